use crate::joints::JOINTS;

pub fn render_index() -> String {
    let checkboxes: String = JOINTS
        .iter()
        .map(|joint| format!(r#"<label><input type="checkbox" value="{joint}" /> {joint}</label>"#))
        .collect::<Vec<_>>()
        .join("\n        ");
    INDEX_HTML.replace("{{JOINTS}}", &checkboxes)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Arthritis Tracker</title>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/jspdf/2.5.1/jspdf.umd.min.js"></script>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --accent: #3d7a6e;
      --muted: #6c6862;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 48px rgba(43, 42, 40, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      font-family: Georgia, serif;
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    nav button,
    .primary {
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      background: #e6e1d6;
      color: var(--ink);
      cursor: pointer;
      font: inherit;
    }

    nav button.active,
    .primary {
      background: var(--accent);
      color: #fff;
    }

    section {
      display: none;
      gap: 12px;
    }

    section.active {
      display: grid;
    }

    .joints {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 6px;
    }

    textarea,
    input[type="text"],
    input[type="date"],
    select {
      width: 100%;
      padding: 8px;
      border-radius: 10px;
      border: 1px solid #cfc9bd;
      font: inherit;
    }

    #bodymap {
      width: 160px;
      height: 480px;
      border-radius: 12px;
      background: linear-gradient(#e9d8c4, #d9c1a7);
      cursor: crosshair;
    }

    .log {
      display: grid;
      gap: 4px;
    }

    .log h3 {
      margin: 12px 0 4px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status.error {
      color: #b3261e;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Arthritis Tracker</h1>
      <p class="status" id="status"></p>
    </header>

    <nav>
      <button data-section="symptoms" class="active">Symptoms</button>
      <button data-section="journal">Journal</button>
      <button data-section="meds">Medications</button>
      <button data-section="history">History</button>
      <button data-section="summary">Summary</button>
      <button data-section="export">Export</button>
    </nav>

    <section id="symptoms" class="active">
      <div class="joints" id="joints">
        {{JOINTS}}
      </div>
      <label>Pain: <span id="painValue">0</span>/10
        <input type="range" id="painSlider" min="0" max="10" value="0" />
      </label>
      <input type="text" id="symptomNotes" placeholder="Notes (optional)" />
      <button class="primary" id="saveSymptoms">Save symptoms</button>
    </section>

    <section id="journal">
      <textarea id="journalText" rows="6" placeholder="How are you feeling today?"></textarea>
      <button class="primary" id="saveJournal">Save entry</button>
    </section>

    <section id="meds">
      <input type="text" id="medName" placeholder="Medication name" />
      <select id="medType">
        <option>Tablet</option>
        <option>Injection</option>
        <option>Cream</option>
        <option>Other</option>
      </select>
      <input type="text" id="medDetails" placeholder="Details (dose, injection site)" />
      <div id="bodymap" title="Click to set injection site"></div>
      <button class="primary" id="saveMed">Save medication</button>
    </section>

    <section id="history">
      <input type="date" id="historyDate" />
      <button class="primary" id="showHistory">Show</button>
      <div class="log" id="historyLog"></div>
    </section>

    <section id="summary">
      <select id="summaryRange">
        <option value="7">Last 7 days</option>
        <option value="30" selected>Last 30 days</option>
        <option value="90">Last 90 days</option>
      </select>
      <button class="primary" id="showSummary">Summarize</button>
      <div class="log" id="summaryLog"></div>
    </section>

    <section id="export">
      <select id="exportMode">
        <option value="detail">Full symptom detail</option>
        <option value="summary">Summary only</option>
      </select>
      <button class="primary" id="exportPdf">Download PDF</button>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);

    const setStatus = (text, tone) => {
      const status = $('status');
      status.textContent = text;
      status.className = tone === 'error' ? 'status error' : 'status';
    };

    const escapeHtml = (text) =>
      String(text ?? '').replace(/[&<>"']/g, (ch) => `&#${ch.charCodeAt(0)};`);

    const when = (iso) => new Date(iso).toLocaleString();

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const post = (url, body) =>
      request(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });

    const newestFirst = (entries) => entries.slice().reverse();

    const symptomLines = (entries) =>
      newestFirst(entries)
        .map((e) =>
          e.joints
            .map((j) => `${escapeHtml(j)} - Pain ${e.pain}/10 - Note: ${escapeHtml((e.joint_notes || {})[j] || e.notes || 'None')}`)
            .join('<br>') + '<hr>'
        )
        .join('');

    const medLines = (entries) =>
      newestFirst(entries)
        .map((e) => `${when(e.date)}: ${escapeHtml(e.name)} (${escapeHtml(e.type)}) - ${escapeHtml(e.details || '')}<br>`)
        .join('');

    document.querySelectorAll('nav button').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('nav button').forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('section').forEach((s) => s.classList.toggle('active', s.id === button.dataset.section));
      });
    });

    $('painSlider').addEventListener('input', () => {
      $('painValue').textContent = $('painSlider').value;
    });

    $('saveSymptoms').addEventListener('click', async () => {
      const joints = [...document.querySelectorAll('#joints input:checked')].map((j) => j.value);
      try {
        await post('/api/symptoms', {
          joints,
          pain: Number($('painSlider').value),
          notes: $('symptomNotes').value
        });
        document.querySelectorAll('#joints input').forEach((j) => (j.checked = false));
        $('symptomNotes').value = '';
        setStatus(joints.length ? 'Symptoms saved!' : 'No symptoms recorded for today.');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('saveJournal').addEventListener('click', async () => {
      try {
        await post('/api/journal', { text: $('journalText').value });
        $('journalText').value = '';
        setStatus('Journal saved!');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('bodymap').addEventListener('click', async (event) => {
      try {
        const res = await request(`/api/bodymap?x=${event.offsetX}&y=${event.offsetY}`);
        $('medDetails').value = res.part;
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('saveMed').addEventListener('click', async () => {
      try {
        await post('/api/meds', {
          name: $('medName').value,
          type: $('medType').value,
          details: $('medDetails').value
        });
        $('medName').value = '';
        $('medDetails').value = '';
        setStatus('Medication saved!');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('showHistory').addEventListener('click', async () => {
      const date = $('historyDate').value;
      const query = date ? `?date=${date}` : '';
      try {
        const day = await request(`/api/history${query}`);
        if (!day.symptoms.length && !day.journal.length && !day.meds.length) {
          $('historyLog').innerHTML = 'No logs for this date.';
          return;
        }
        $('historyLog').innerHTML =
          '<h3>Symptoms</h3>' + symptomLines(day.symptoms) +
          '<h3>Journal</h3>' + newestFirst(day.journal).map((e) => `${when(e.date)}: ${escapeHtml(e.text)}<br><hr>`).join('') +
          '<h3>Medications</h3>' + medLines(day.meds);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('showSummary').addEventListener('click', async () => {
      try {
        const summary = await request(`/api/summary?days=${$('summaryRange').value}`);
        const stats = summary.stats;
        const average = stats.average_pain === null ? 'undefined' : `${stats.average_pain.toFixed(1)}/10`;
        const joints = stats.top_joints.length ? stats.top_joints.map(escapeHtml).join(', ') : 'None';
        $('summaryLog').innerHTML =
          `<p>Average pain: ${average}<br>Most affected joints: ${joints}<br>` +
          `Symptom entries: ${stats.symptom_count}<br>Medication entries: ${stats.medication_count}</p>` +
          '<h3>Symptoms Summary</h3>' + symptomLines(summary.symptoms) +
          '<h3>Medications Summary</h3>' + medLines(summary.meds);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('exportPdf').addEventListener('click', async () => {
      try {
        const report = await request(`/api/export?mode=${$('exportMode').value}`);
        const doc = new window.jspdf.jsPDF();
        report.lines.forEach((line) => {
          doc.setFontSize(line.font_size);
          doc.text(line.text, line.x, line.y);
        });
        doc.save(report.filename);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });
  </script>
</body>
</html>
"#;
