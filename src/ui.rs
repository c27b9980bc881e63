use crate::models::Dashboard;
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, dashboard: &Dashboard) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{TOTAL}}", &dashboard.total_earned.to_string())
        .replace("{{COUNT}}", &dashboard.records.len().to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tsum Coin Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Nunito:wght@400;600;700&display=swap');

    :root {
      --bg: #f2f4f8;
      --ink: #27303f;
      --muted: #6d7686;
      --gold: #d99a1b;
      --teal: #1f6f78;
      --card: #ffffff;
      --line: rgba(39, 48, 63, 0.1);
      --shadow: 0 16px 40px rgba(39, 48, 63, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e4ecf5);
      color: var(--ink);
      font-family: 'Nunito', 'Segoe UI', sans-serif;
      padding: 24px;
    }

    .layout {
      display: grid;
      grid-template-columns: 320px 1fr;
      gap: 24px;
      max-width: 1180px;
      margin: 0 auto;
      align-items: start;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      border: 1px solid var(--line);
      box-shadow: var(--shadow);
      padding: 24px;
    }

    h1 {
      margin: 0 0 4px;
      font-size: 1.5rem;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .tagline {
      margin: 0 0 20px;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .sidebar label {
      display: block;
      margin: 12px 0 4px;
      font-size: 0.85rem;
      font-weight: 600;
      color: var(--muted);
    }

    .sidebar input,
    .sidebar textarea {
      width: 100%;
      padding: 9px 10px;
      border: 1px solid var(--line);
      border-radius: 10px;
      font: inherit;
      background: #fbfcfe;
    }

    .sidebar textarea {
      min-height: 64px;
      resize: vertical;
    }

    .sidebar button {
      margin-top: 18px;
      width: 100%;
      padding: 12px;
      border: none;
      border-radius: 999px;
      background: var(--gold);
      color: white;
      font: inherit;
      font-weight: 700;
      cursor: pointer;
    }

    .sidebar button:active {
      transform: scale(0.98);
    }

    .status {
      margin-top: 12px;
      min-height: 1.2em;
      font-size: 0.9rem;
    }

    .status[data-type='error'] {
      color: #b3362a;
    }

    .status[data-type='ok'] {
      color: #2d7a4b;
    }

    .main {
      display: grid;
      gap: 24px;
    }

    .metric .value {
      font-size: 2.2rem;
      font-weight: 700;
      color: var(--teal);
    }

    .metric .label {
      color: var(--muted);
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .chart-svg {
      width: 100%;
      height: 240px;
      display: block;
    }

    .bar {
      fill: var(--gold);
    }

    .bar.month {
      fill: var(--teal);
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
      font-family: 'Nunito', sans-serif;
    }

    .table-wrap {
      max-height: 420px;
      overflow: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th,
    td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid var(--line);
      white-space: nowrap;
    }

    td.memo {
      white-space: normal;
    }

    th {
      position: sticky;
      top: 0;
      background: var(--card);
      color: var(--muted);
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
    }

    .empty {
      color: var(--muted);
      text-align: center;
      padding: 36px 12px;
    }

    .hidden {
      display: none;
    }

    @media (max-width: 820px) {
      .layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <div class="layout">
    <aside class="card sidebar">
      <h1>Tsum Coin Log</h1>
      <p class="tagline">Log each play session and watch the coins add up.</p>
      <form id="record-form" method="post" action="/records">
        <label for="date">Date</label>
        <input id="date" name="date" type="date" value="{{TODAY}}" required />

        <label for="coins_before">Coins before</label>
        <input id="coins_before" name="coins_before" type="number" min="0" step="1000" value="0" required />

        <label for="coins_after">Coins after</label>
        <input id="coins_after" name="coins_after" type="number" min="0" step="1000" value="0" required />

        <label for="play_count">Plays (optional)</label>
        <input id="play_count" name="play_count" type="number" min="0" step="1" />

        <label for="tsum_used">Main tsum (optional)</label>
        <input id="tsum_used" name="tsum_used" type="text" />

        <label for="memo">Memo (optional)</label>
        <textarea id="memo" name="memo"></textarea>

        <button type="submit">Record it</button>
      </form>
      <div class="status" id="status"></div>
    </aside>

    <main class="main">
      <section class="card" id="empty-panel">
        <p class="empty">No records yet. Log your first session from the form.</p>
      </section>

      <section class="card metric hidden" id="total-panel">
        <span class="label">Total coins earned</span>
        <span class="value" id="total">{{TOTAL}}</span>
      </section>

      <div class="charts hidden" id="chart-panels">
        <section class="card">
          <h2>Coins per day</h2>
          <svg id="daily-chart" class="chart-svg" viewBox="0 0 520 240" role="img" aria-label="Daily coins"></svg>
        </section>
        <section class="card">
          <h2>Coins per month</h2>
          <svg id="monthly-chart" class="chart-svg" viewBox="0 0 520 240" role="img" aria-label="Monthly coins"></svg>
        </section>
      </div>

      <section class="card hidden" id="table-panel">
        <h2>All records ({{COUNT}})</h2>
        <div class="table-wrap">
          <table>
            <thead>
              <tr>
                <th>Date</th>
                <th>Before</th>
                <th>After</th>
                <th>Earned</th>
                <th>Plays</th>
                <th>Tsum</th>
                <th>Memo</th>
              </tr>
            </thead>
            <tbody id="record-rows"></tbody>
          </table>
        </div>
      </section>
    </main>
  </div>

  <script>
    const form = document.getElementById('record-form');
    const statusEl = document.getElementById('status');
    const emptyPanel = document.getElementById('empty-panel');
    const totalPanel = document.getElementById('total-panel');
    const chartPanels = document.getElementById('chart-panels');
    const tablePanel = document.getElementById('table-panel');
    const totalEl = document.getElementById('total');
    const rowsEl = document.getElementById('record-rows');
    const dailyChart = document.getElementById('daily-chart');
    const monthlyChart = document.getElementById('monthly-chart');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const coins = (value) => Number(value).toLocaleString();

    const renderBarChart = (svg, points, barClass) => {
      const width = 520;
      const height = 240;
      const padLeft = 56;
      const padBottom = 34;
      const padTop = 16;

      const max = Math.max(...points.map((p) => p.value), 1);
      const plotWidth = width - padLeft - 12;
      const plotHeight = height - padTop - padBottom;
      const slot = plotWidth / points.length;
      const barWidth = Math.min(42, slot * 0.7);

      let parts = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const y = height - padBottom - (value / max) * plotHeight;
        parts += `<line class='chart-grid' x1='${padLeft}' y1='${y}' x2='${width - 12}' y2='${y}' />`;
        parts += `<text class='chart-label' x='${padLeft - 8}' y='${y + 4}' text-anchor='end'>${coins(Math.round(value))}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      points.forEach((point, index) => {
        const x = padLeft + index * slot + (slot - barWidth) / 2;
        const barHeight = (point.value / max) * plotHeight;
        const y = height - padBottom - barHeight;
        parts += `<rect class='bar ${barClass}' x='${x.toFixed(1)}' y='${y.toFixed(1)}' width='${barWidth.toFixed(1)}' height='${barHeight.toFixed(1)}' rx='3' />`;
        if (index % labelEvery === 0) {
          const cx = padLeft + index * slot + slot / 2;
          parts += `<text class='chart-label' x='${cx.toFixed(1)}' y='${height - padBottom + 18}' text-anchor='middle'>${point.label}</text>`;
        }
      });

      svg.innerHTML = parts;
    };

    const escapeHtml = (text) =>
      text
        .replaceAll('&', '&amp;')
        .replaceAll('<', '&lt;')
        .replaceAll('>', '&gt;');

    const renderTable = (records) => {
      rowsEl.innerHTML = records
        .map(
          (r) => `<tr>
            <td>${r.date}</td>
            <td>${coins(r.coins_before)}</td>
            <td>${coins(r.coins_after)}</td>
            <td>${coins(r.coins_earned)}</td>
            <td>${coins(r.play_count)}</td>
            <td>${escapeHtml(r.tsum_used)}</td>
            <td class='memo'>${escapeHtml(r.memo)}</td>
          </tr>`
        )
        .join('');
    };

    const renderDashboard = (dashboard) => {
      const hasRecords = dashboard.records.length > 0;
      emptyPanel.classList.toggle('hidden', hasRecords);
      totalPanel.classList.toggle('hidden', !hasRecords);
      chartPanels.classList.toggle('hidden', !hasRecords);
      tablePanel.classList.toggle('hidden', !hasRecords);
      if (!hasRecords) {
        return;
      }

      totalEl.textContent = coins(dashboard.total_earned);
      tablePanel.querySelector('h2').textContent = `All records (${dashboard.records.length})`;
      renderBarChart(
        dailyChart,
        dashboard.daily.map((p) => ({ label: p.date.slice(5), value: p.coins_earned })),
        ''
      );
      renderBarChart(
        monthlyChart,
        dashboard.monthly.map((p) => ({ label: p.month, value: p.coins_earned })),
        'month'
      );
      renderTable(dashboard.records);
    };

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load the dashboard');
      }
      renderDashboard(await res.json());
    };

    const optionalNumber = (raw) => (raw.trim() === '' ? 0 : Number(raw));

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const payload = {
        date: form.elements.date.value,
        coins_before: Number(form.elements.coins_before.value),
        coins_after: Number(form.elements.coins_after.value),
        play_count: optionalNumber(form.elements.play_count.value),
        tsum_used: form.elements.tsum_used.value.trim(),
        memo: form.elements.memo.value.trim()
      };

      setStatus('Saving...', '');
      fetch('/api/records', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      })
        .then(async (res) => {
          if (!res.ok) {
            throw new Error((await res.text()) || 'Submission failed');
          }
          form.reset();
          form.elements.date.value = '{{TODAY}}';
          setStatus('Recorded!', 'ok');
          setTimeout(() => setStatus('', ''), 1600);
          return loadDashboard();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    loadDashboard().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
