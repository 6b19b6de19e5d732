use crate::models::TodayResponse;
use chrono::{Datelike, Duration, NaiveDate};

const FOREST_STAGES: [&str; 6] = ["🌰", "🌱", "🌿", "🪴", "🌳", "🌲"];

pub fn render_index(today: NaiveDate, view: &TodayResponse) -> String {
    INDEX_HTML
        .replace("{{MONTH_TITLE}}", &today.format("%B %Y").to_string())
        .replace("{{DATE}}", &view.date)
        .replace("{{CALENDAR}}", &render_calendar(today))
        .replace("{{RATE}}", &view.rate.to_string())
        .replace("{{STREAK}}", &view.streak.to_string())
        .replace("{{FOREST}}", forest_emoji(view.forest_level))
}

pub fn forest_emoji(level: u8) -> &'static str {
    FOREST_STAGES[usize::from(level).min(FOREST_STAGES.len() - 1)]
}

/// Lays the current month out as Monday-first weeks. Cells outside the
/// month are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = date.with_day(1).unwrap_or(date);
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    for day in 1..=days_in_month(date) {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match first_of_next {
        Some(next) => (next - Duration::days(1)).day(),
        None => 31,
    }
}

fn render_calendar(today: NaiveDate) -> String {
    let mut html = String::new();
    for week in month_grid(today) {
        for cell in week {
            match cell {
                Some(day) if day == today.day() => {
                    html.push_str(&format!(
                        "<div class=\"cell today\"><span class=\"daynum\">{day}</span><span class=\"cal-rate\" id=\"cal-rate\">{{{{RATE}}}}%</span></div>"
                    ));
                }
                Some(day) => {
                    html.push_str(&format!(
                        "<div class=\"cell\"><span class=\"daynum\">{day}</span></div>"
                    ));
                }
                None => html.push_str("<div class=\"cell empty\"></div>"),
            }
        }
    }
    // {{RATE}} inside the today cell is filled by the outer replace pass
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ec;
      --bg-2: #cfe8cb;
      --ink: #26322a;
      --accent: #3e8e5a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f2df 60%, #f2f8ee 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5d665f;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #84917f;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.rate {
      color: var(--accent);
    }

    .calendar-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .calendar-card h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .cal-head {
      text-align: center;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #84917f;
      padding: 4px 0;
    }

    .cell {
      min-height: 54px;
      border-radius: 12px;
      background: #f6faf4;
      border: 1px solid rgba(47, 72, 88, 0.06);
      padding: 6px 8px;
      display: flex;
      flex-direction: column;
      gap: 2px;
    }

    .cell.empty {
      background: transparent;
      border: none;
    }

    .cell.today {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(62, 142, 90, 0.35);
    }

    .daynum {
      font-weight: 600;
      font-size: 0.95rem;
    }

    .cal-rate {
      font-size: 0.8rem;
      opacity: 0.9;
    }

    .today-area {
      display: grid;
      grid-template-columns: 1.4fr 1fr;
      gap: 16px;
    }

    .checklist-card,
    .partner-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
      align-content: start;
    }

    .checklist-card h2,
    .partner-card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    #habit-list {
      display: grid;
      gap: 8px;
    }

    .habit {
      display: flex;
      align-items: center;
      gap: 10px;
      padding: 10px 12px;
      border-radius: 12px;
      background: #f6faf4;
      border: 1px solid rgba(47, 72, 88, 0.06);
    }

    .habit input {
      width: 18px;
      height: 18px;
      accent-color: var(--accent);
    }

    .habit.done span {
      text-decoration: line-through;
      color: #8a958a;
    }

    .add-row {
      display: flex;
      gap: 8px;
    }

    .add-row input {
      flex: 1;
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-family: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    button.secondary {
      background: var(--accent-2);
    }

    .mood-row {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .mood-row input[type="range"] {
      flex: 1;
      accent-color: var(--accent);
    }

    #partner-figure {
      display: grid;
      place-items: center;
      gap: 8px;
      min-height: 140px;
      color: #6b766c;
      font-size: 0.95rem;
      text-align: center;
    }

    #partner-figure img {
      width: 120px;
      height: 120px;
      object-fit: contain;
    }

    .forest {
      font-size: 2rem;
      line-height: 1;
    }

    .status {
      font-size: 0.95rem;
      color: #6b766c;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f7a6e;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 640px) {
      .app {
        padding: 28px 22px;
      }
      .today-area {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
      <p class="subtitle">Tick off today's habits, keep the streak alive, grow the forest.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Today</span>
        <span id="date" class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Completion</span>
        <span id="rate" class="value rate">{{RATE}}%</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span id="streak" class="value">{{STREAK}}</span>
      </div>
      <div class="stat">
        <span class="label">Forest</span>
        <span id="forest" class="value forest">{{FOREST}}</span>
      </div>
    </section>

    <section class="calendar-card">
      <h2>{{MONTH_TITLE}}</h2>
      <div class="calendar">
        <div class="cal-head">Mon</div>
        <div class="cal-head">Tue</div>
        <div class="cal-head">Wed</div>
        <div class="cal-head">Thu</div>
        <div class="cal-head">Fri</div>
        <div class="cal-head">Sat</div>
        <div class="cal-head">Sun</div>
        {{CALENDAR}}
      </div>
    </section>

    <section class="today-area">
      <div class="checklist-card">
        <h2>Today's habits</h2>
        <div id="habit-list"></div>
        <form id="add-form" class="add-row">
          <input id="habit-name" type="text" placeholder="New habit" autocomplete="off" />
          <button type="submit">Add</button>
        </form>
        <div class="mood-row">
          <span>Mood</span>
          <input id="mood" type="range" min="1" max="10" value="5" />
          <span id="mood-value">5</span>
          <button class="secondary" id="mood-save" type="button">Save</button>
        </div>
      </div>
      <div class="partner-card">
        <h2>Today's partner</h2>
        <div id="partner-figure">No partner yet.</div>
        <button id="partner-btn" type="button">Summon a partner</button>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Everything lives in this server session only; restarting the server starts a fresh month.</p>
  </main>

  <script>
    const dateEl = document.getElementById('date');
    const rateEl = document.getElementById('rate');
    const streakEl = document.getElementById('streak');
    const forestEl = document.getElementById('forest');
    const calRateEl = document.getElementById('cal-rate');
    const listEl = document.getElementById('habit-list');
    const statusEl = document.getElementById('status');
    const moodEl = document.getElementById('mood');
    const moodValueEl = document.getElementById('mood-value');
    const partnerFigureEl = document.getElementById('partner-figure');

    const FOREST_STAGES = ['🌰', '🌱', '🌿', '🪴', '🌳', '🌲'];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderHabits = (habits) => {
      listEl.innerHTML = '';
      for (const habit of habits) {
        const row = document.createElement('label');
        row.className = habit.done ? 'habit done' : 'habit';

        const box = document.createElement('input');
        box.type = 'checkbox';
        box.checked = habit.done;
        box.addEventListener('change', () => {
          toggle(habit.id, box.checked).catch((err) => setStatus(err.message, 'error'));
        });

        const name = document.createElement('span');
        name.textContent = habit.name;

        row.append(box, name);
        listEl.append(row);
      }
      if (!habits.length) {
        listEl.textContent = 'No habits defined for today.';
      }
    };

    const updateUI = (data) => {
      dateEl.textContent = data.date;
      rateEl.textContent = `${data.rate}%`;
      if (calRateEl) {
        calRateEl.textContent = `${data.rate}%`;
      }
      streakEl.textContent = data.streak;
      forestEl.textContent = FOREST_STAGES[Math.min(data.forest_level, FOREST_STAGES.length - 1)];
      if (data.mood != null) {
        moodEl.value = data.mood;
        moodValueEl.textContent = data.mood;
      }
      renderHabits(data.habits);
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const loadToday = async () => {
      updateUI(await request('/api/today'));
    };

    const toggle = async (habitId, done) => {
      setStatus('Saving...', 'info');
      updateUI(await request('/api/completion', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ habit_id: habitId, done })
      }));
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const addHabit = async (name) => {
      updateUI(await request('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name })
      }));
    };

    const saveMood = async () => {
      updateUI(await request('/api/mood', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ score: Number(moodEl.value) })
      }));
      setStatus('Mood saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const summonPartner = async () => {
      partnerFigureEl.textContent = 'Searching the tall grass...';
      const data = await request('/api/partner');
      if (data.status !== 'ok') {
        partnerFigureEl.textContent = 'Partner unavailable right now. Try again later.';
        return;
      }
      partnerFigureEl.innerHTML = '';
      if (data.image) {
        const img = document.createElement('img');
        img.src = data.image;
        img.alt = data.name;
        partnerFigureEl.append(img);
      }
      const caption = document.createElement('span');
      caption.textContent = `Partner: ${data.name}`;
      partnerFigureEl.append(caption);
    };

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const input = document.getElementById('habit-name');
      const name = input.value.trim();
      if (!name) {
        return;
      }
      addHabit(name)
        .then(() => { input.value = ''; })
        .catch((err) => setStatus(err.message, 'error'));
    });

    moodEl.addEventListener('input', () => {
      moodValueEl.textContent = moodEl.value;
    });

    document.getElementById('mood-save').addEventListener('click', () => {
      saveMood().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('partner-btn').addEventListener('click', () => {
      summonPartner().catch((err) => setStatus(err.message, 'error'));
    });

    loadToday().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
