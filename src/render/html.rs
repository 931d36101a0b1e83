use crate::model::DashboardData;

/// Render a self-contained HTML dashboard (data embedded as JSON).
///
/// The template is substituted with `replace` rather than `format!()` since the
/// embedded JS is full of `{}` and `${x}`.
pub fn render_html_report(data: &DashboardData) -> anyhow::Result<String> {
    // `</` would end the script element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>QB Pass Tendencies</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { display: grid; grid-template-columns: repeat(auto-fit, minmax(520px, 1fr)); gap: 16px; padding: 16px; }
  section { border: 1px solid #eee; border-radius: 8px; padding: 12px; overflow: auto; }
  h1 { font-size: 20px; margin: 0 0 8px 0; }
  h2 { font-size: 16px; margin: 0 0 8px 0; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .muted { color: #777; font-size: 12px; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 4px 8px; text-align: left; font-size: 13px; }
  th { background: white; border-bottom: 1px solid #ddd; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
  .selected td { font-weight: 600; background: #fff3ec; }
  .swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 6px; }

  svg.field { background: #2e7d32; width: 100%; max-width: 720px; }
  svg.field line { stroke: rgba(255,255,255,0.5); stroke-width: 0.5; }
  svg.field circle { fill: rgb(233,84,32); stroke: white; stroke-width: 0.4; }
  svg.field rect.cell { fill: #ffeb3b; }
</style>
</head>
<body>
<header>
  <h1 id="title"></h1>
  <div class="summary" id="summary"></div>
</header>

<main>
  <section>
    <h2>Pass locations</h2>
    <div id="field"></div>
    <div class="muted" id="fieldNote"></div>
  </section>

  <section>
    <h2>Direction x depth</h2>
    <table id="roseDirection"></table>
  </section>

  <section>
    <h2>Top receivers by outcome</h2>
    <table id="roseReceiver"></table>
  </section>

  <section>
    <h2>Play clock at snap</h2>
    <table id="timeline"></table>
  </section>

  <section>
    <h2>Target flow</h2>
    <table id="sankey"></table>
  </section>

  <section>
    <h2>Passer tendencies</h2>
    <table id="stats"></table>
  </section>
</main>

<script>
const DATA = __DATA__;

const FIELD_W = 360;
const FIELD_H = 160;

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#039;");
}

function fmtPct(x) {
  return (x * 100).toFixed(1) + "%";
}

function fmtNum(x, digits) {
  if (x === null || x === undefined) return "-";
  return Number(x).toFixed(digits);
}

function renderTable(id, header, rows, rowClass) {
  const table = document.getElementById(id);
  const head = "<thead><tr>" + header.map(h => `<th>${escapeHtml(h)}</th>`).join("") + "</tr></thead>";
  const body = rows.map((cells, i) => {
    const cls = rowClass ? rowClass(i) : "";
    return `<tr class="${cls}">` + cells.join("") + "</tr>";
  }).join("");
  table.innerHTML = head + "<tbody>" + body + "</tbody>";
  if (!rows.length) {
    table.insertAdjacentHTML("beforeend", `<tr><td class="muted" colspan="${header.length}">No data</td></tr>`);
  }
}

function td(v) { return `<td>${escapeHtml(v)}</td>`; }
function tdNum(v) { return `<td class="num">${escapeHtml(v)}</td>`; }

function renderSummary() {
  document.getElementById("title").textContent = DATA.passer || "No passer selected";
  const el = document.getElementById("summary");
  const s = DATA.summary;
  if (!s) {
    el.innerHTML = `<span class="pill">No attempts</span>`;
    return;
  }
  el.innerHTML = `
    <span class="pill">Attempts: <b>${s.attempts}</b></span>
    <span class="pill">Completions: <b>${s.completions}</b> (${fmtPct(s.completion_pct)})</span>
    <span class="pill">EPA: <b>${fmtNum(s.total_epa, 2)}</b> total, <b>${fmtNum(s.avg_epa, 3)}</b>/att</span>
    <span class="pill">Air yards: <b>${fmtNum(s.total_air_yards, 0)}</b> total, <b>${fmtNum(s.avg_air_yards, 1)}</b>/att</span>
  `;
}

function renderField() {
  let svg = `<svg class="field" viewBox="0 0 ${FIELD_W} ${FIELD_H}">`;
  for (let x = 30; x <= FIELD_W - 30; x += 15) {
    svg += `<line x1="${x}" y1="0" x2="${x}" y2="${FIELD_H}"></line>`;
  }
  const peak = Math.max(1, ...DATA.density.map(c => c.count));
  for (const c of DATA.density) {
    svg += `<rect class="cell" x="${c.x}" y="${FIELD_H - c.y - 3}" width="3" height="3" opacity="${(0.15 + 0.6 * c.count / peak).toFixed(2)}"></rect>`;
  }
  for (const p of DATA.points) {
    const t = p.tooltip;
    const tip = [
      `Receiver: ${t.receiver ?? "-"}`,
      `Air yards: ${fmtNum(t.air_yards, 0)}`,
      `Down: ${t.down ?? "-"} & ${t.distance ?? "-"}`,
      `Date: ${t.date}`,
      `Play clock: ${fmtNum(t.play_clock, 0)}`,
      `${t.posteam ?? ""} vs ${t.defteam ?? ""}`,
      `EPA: ${fmtNum(t.epa, 2)}`,
    ].join("\n");
    svg += `<circle cx="${p.x}" cy="${FIELD_H - p.y}" r="1.6"><title>${escapeHtml(tip)}</title></circle>`;
  }
  svg += "</svg>";
  document.getElementById("field").innerHTML = svg;
  document.getElementById("fieldNote").textContent = `${DATA.points.length} located passes`;
}

function renderRoses() {
  const depths = [...new Set(DATA.rose_direction.map(r => r.depth))];
  const byDir = new Map();
  for (const r of DATA.rose_direction) {
    if (!byDir.has(r.direction)) byDir.set(r.direction, {});
    byDir.get(r.direction)[r.depth] = r.frequency;
  }
  renderTable("roseDirection", ["Direction", ...depths],
    [...byDir.entries()].map(([dir, counts]) => [td(dir), ...depths.map(d => tdNum(counts[d]))]));

  renderTable("roseReceiver", ["Receiver", "Outcome", "Frequency"],
    DATA.rose_receiver.map(r => [td(r.receiver), td(r.outcome), tdNum(r.frequency)]));
}

function renderTimeline() {
  const series = DATA.timeline.series;
  renderTable("timeline", ["Series", ...DATA.timeline.buckets],
    series.map(s => [td(s.label), ...s.shares.map(x => tdNum(fmtPct(x)))]),
    i => series[i].role === "selected" ? "selected" : (series[i].role === "baseline" ? "muted" : ""));
}

function renderSankey() {
  const nodes = DATA.sankey.nodes;
  renderTable("sankey", ["From", "To", "Targets"],
    DATA.sankey.links.map(l => [
      td(nodes[l.source].label),
      `<td><span class="swatch" style="background:${escapeHtml(l.color)}"></span>${escapeHtml(nodes[l.target].label)}</td>`,
      tdNum(l.value),
    ]));
}

function renderStats() {
  renderTable("stats", ["Passer", "Att", "0-10 yd", "10-20 yd", "20+ yd", "EPA/att", "Cmp %", "aDOT"],
    DATA.stats.map(s => [
      td(s.passer),
      tdNum(s.attempts),
      tdNum(fmtPct(s.short_pct)),
      tdNum(fmtPct(s.intermediate_pct)),
      tdNum(fmtPct(s.deep_pct)),
      tdNum(fmtNum(s.avg_epa, 3)),
      tdNum(fmtPct(s.completion_pct)),
      tdNum(fmtNum(s.avg_air_yards, 1)),
    ]),
    i => DATA.stats[i].passer === DATA.passer ? "selected" : "");
}

renderSummary();
renderField();
renderRoses();
renderTimeline();
renderSankey();
renderStats();
</script>
</body>
</html>
"#;

    Ok(TEMPLATE.replace("__DATA__", &json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_data_once() {
        let html = render_html_report(&DashboardData::empty("J.Love")).unwrap();
        assert!(!html.contains("__DATA__"));
        assert!(html.contains(r#""passer":"J.Love""#));
        assert!(html.contains(r#""depth":"20+ yd""#));
    }

    #[test]
    fn density_cells_share_the_flipped_y_axis_with_points() {
        let html = render_html_report(&DashboardData::empty("J.Love")).unwrap();
        assert!(html.contains(r#"cy="${FIELD_H - p.y}""#));
        assert!(html.contains(r#"y="${FIELD_H - c.y - 3}""#));
    }

    #[test]
    fn script_close_tags_in_data_are_escaped() {
        let html = render_html_report(&DashboardData::empty("</script><b>")).unwrap();
        assert!(html.contains(r#""passer":"<\/script><b>""#));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
