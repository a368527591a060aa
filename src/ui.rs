use crate::models::{DailySummary, Dashboard};

pub fn render_index(dashboard: &Dashboard, undo_available: bool) -> String {
    let (due_line, age_line) = match &dashboard.countdown {
        Some(countdown) => (
            format!(
                "Baby's due date: {} (<span class=\"accent\">{}</span> days to go)",
                countdown.due_date_label, countdown.info.days_to_go
            ),
            format!("Fetal age: {}", countdown.fetal_age),
        ),
        None => (String::new(), String::new()),
    };

    let (kicks, time_to_10) = if dashboard.loading {
        ("…".to_string(), "…")
    } else {
        (
            dashboard.kick_count.to_string(),
            dashboard.time_to_10_kicks.as_deref().unwrap_or("-"),
        )
    };

    INDEX_HTML
        .replace("{{DATE}}", &dashboard.date)
        .replace("{{KICKS}}", &kicks)
        .replace("{{TIME_TO_10}}", time_to_10)
        .replace("{{LOADING_HIDDEN}}", if dashboard.loading { "" } else { "hidden" })
        .replace("{{DUE_LINE}}", &due_line)
        .replace("{{AGE_LINE}}", &age_line)
        .replace("{{HISTORY_ROWS}}", &history_rows(&dashboard.history))
        .replace("{{VERSION}}", &dashboard.version.to_string())
        .replace("{{UNDO_HIDDEN}}", if undo_available { "" } else { "hidden" })
}

fn history_rows(history: &[DailySummary]) -> String {
    if history.is_empty() {
        return r#"<tr><td colspan="3" class="empty">No kicks logged yet</td></tr>"#.to_string();
    }
    history
        .iter()
        .map(|day| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                day.label,
                day.kick_count,
                day.time_to_10_kicks.as_deref().unwrap_or("-")
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Kick Tracker</title>
  <style>
    :root {
      --bg-1: #fdf2f8;
      --bg-2: #eff6ff;
      --ink: #1f2937;
      --accent: #db2777;
      --accent-2: #7c3aed;
      --accent-3: #2563eb;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(124, 58, 237, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #f5f3ff 50%, var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    .subtitle,
    .countdown p {
      margin: 4px 0 0;
      color: #4b5563;
      font-size: 0.95rem;
    }

    .accent {
      color: var(--accent);
    }

    .loading {
      margin: 0;
      text-align: center;
      color: #6b7280;
    }

    .panel {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
      text-align: center;
    }

    .stat .value {
      display: block;
      font-size: 1.9rem;
      font-weight: 700;
      color: var(--accent-2);
    }

    .stat .value.time {
      color: var(--accent-3);
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      width: 100%;
    }

    button:disabled {
      opacity: 0.6;
      cursor: wait;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      padding: 10px 12px;
      text-align: left;
      border-bottom: 1px solid #ede9fe;
    }

    th {
      background: #f5f3ff;
      color: #4c1d95;
    }

    td.empty {
      text-align: center;
      color: #6b7280;
      padding: 28px 12px;
    }

    .toast {
      position: fixed;
      top: 18px;
      left: 50%;
      transform: translateX(-50%);
      background: white;
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 12px 16px;
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .toast.error {
      color: #b91c1c;
    }

    .toast button {
      width: auto;
      padding: 6px 12px;
      font-size: 0.85rem;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Kick Tracker</h1>
      <p class="subtitle">Track your baby's kicks &middot; <span id="date">{{DATE}}</span></p>
    </header>

    <section class="countdown">
      <p id="due-line">{{DUE_LINE}}</p>
      <p id="age-line">{{AGE_LINE}}</p>
    </section>

    <p class="loading" id="loading" {{LOADING_HIDDEN}}>Loading kicks&hellip;</p>

    <section class="panel">
      <div class="stat">
        <span>Kicks today</span>
        <span class="value" id="kicks">{{KICKS}}</span>
      </div>
      <div class="stat">
        <span>Time to 10</span>
        <span class="value time" id="time-to-10">{{TIME_TO_10}}</span>
      </div>
    </section>

    <form id="log-form" method="post" action="/kick/log">
      <button type="submit" id="log-button">+ Log Kick</button>
    </form>
    <form id="undo-form" method="post" action="/kick/undo" {{UNDO_HIDDEN}}>
      <noscript><button type="submit">Undo last kick</button></noscript>
    </form>

    <section>
      <h2>History</h2>
      <table>
        <thead>
          <tr><th>Date</th><th>Kicks</th><th>Time to 10</th></tr>
        </thead>
        <tbody id="history">{{HISTORY_ROWS}}</tbody>
      </table>
    </section>
  </main>

  <div class="toast" id="toast" hidden>
    <span id="toast-message"></span>
    <button type="button" id="toast-undo" hidden>Undo</button>
  </div>

  <script>
    let version = {{VERSION}};
    let toastTimer = null;

    const el = (id) => document.getElementById(id);
    const logButton = el('log-button');

    const showToast = (message, kind, withUndo) => {
      el('toast-message').textContent = message;
      el('toast').className = `toast ${kind}`;
      el('toast-undo').hidden = !withUndo;
      el('toast').hidden = false;
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => { el('toast').hidden = true; }, withUndo ? 5000 : 2500);
    };

    const renderHistory = (history) => {
      const body = el('history');
      body.textContent = '';
      if (history.length === 0) {
        const row = body.insertRow();
        const cell = row.insertCell();
        cell.colSpan = 3;
        cell.className = 'empty';
        cell.textContent = 'No kicks logged yet';
        return;
      }
      history.forEach((day) => {
        const row = body.insertRow();
        row.insertCell().textContent = day.label;
        row.insertCell().textContent = day.kick_count;
        row.insertCell().textContent = day.time_to_10_kicks || '-';
      });
    };

    const updateUI = (dashboard) => {
      version = dashboard.version;
      el('date').textContent = dashboard.date;
      el('loading').hidden = !dashboard.loading;
      if (dashboard.loading) {
        el('kicks').textContent = '…';
        el('time-to-10').textContent = '…';
        return;
      }
      el('kicks').textContent = dashboard.kick_count;
      el('time-to-10').textContent = dashboard.time_to_10_kicks || '-';
      if (dashboard.countdown) {
        const c = dashboard.countdown;
        el('due-line').innerHTML = '';
        el('due-line').append(`Baby's due date: ${c.due_date_label} (`);
        const days = document.createElement('span');
        days.className = 'accent';
        days.textContent = c.days_to_go;
        el('due-line').append(days, ' days to go)');
        el('age-line').textContent = `Fetal age: ${c.fetal_age}`;
      }
      renderHistory(dashboard.history);
    };

    const send = async (path) => {
      logButton.disabled = true;
      try {
        const res = await fetch(path, { method: 'POST' });
        if (!res.ok) {
          throw new Error((await res.text()) || 'Request failed');
        }
        const body = await res.json();
        updateUI(body.dashboard);
        showToast(body.message, 'ok', body.undo_available);
      } finally {
        logButton.disabled = false;
      }
    };

    const watchChanges = async () => {
      for (;;) {
        try {
          const res = await fetch(`/api/changes?since=${version}`);
          if (res.ok) {
            updateUI(await res.json());
            continue;
          }
        } catch (err) {
          // server restarting; retry below
        }
        await new Promise((resolve) => setTimeout(resolve, 3000));
      }
    };

    el('log-form').addEventListener('submit', (event) => {
      event.preventDefault();
      send('/api/kick').catch((err) => showToast(err.message, 'error', false));
    });

    el('toast-undo').addEventListener('click', () => {
      send('/api/undo').catch((err) => showToast(err.message, 'error', false));
    });

    watchChanges();
  </script>
</body>
</html>
"#;
