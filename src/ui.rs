use crate::models::{DailyPoint, DashboardResponse};

pub fn render_index(dashboard: &DashboardResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &dashboard.date)
        .replace("{{QUOTE}}", &escape_html(&dashboard.quote))
        .replace("{{STREAK}}", &dashboard.streak.to_string())
        .replace("{{WATER}}", &dashboard.water.water_ml.to_string())
        .replace("{{WATER_GOAL}}", &dashboard.water.goal_ml.to_string())
        .replace("{{WATER_PCT}}", &format!("{:.0}", dashboard.water.percentage))
        .replace("{{CALORIES}}", &dashboard.calories.consumed.to_string())
        .replace("{{CALORIE_TARGET}}", &dashboard.calories.target.to_string())
        .replace("{{CALORIE_NOTE}}", &calorie_note(dashboard.calories.remaining))
        .replace("{{BMI}}", &format!("{:.1}", dashboard.bmi.bmi))
        .replace("{{BMI_CATEGORY}}", &escape_html(&dashboard.bmi.category))
        .replace(
            "{{GOALS}}",
            &format!("{}/{}", dashboard.goals_completed, dashboard.goals_total),
        )
        .replace("{{WEEK_ROWS}}", &week_rows(&dashboard.last_7_days))
}

fn calorie_note(remaining: i64) -> String {
    if remaining > 0 {
        format!("{remaining} calories remaining")
    } else {
        format!("{} calories over target", remaining.unsigned_abs())
    }
}

fn week_rows(points: &[DailyPoint]) -> String {
    let max = points.iter().map(|p| p.calories).max().unwrap_or(0).max(1);
    points
        .iter()
        .map(|point| {
            let width = point.calories * 100 / max;
            format!(
                r#"<div class="row"><span class="label" title="{date}">{label}</span><span class="bar" style="width: {width}%"></span><span class="value">{calories} kcal / {duration} min</span></div>"#,
                date = point.date,
                label = point.label,
                calories = point.calories,
                duration = point.duration,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>FitTrack</title>
  <style>
    :root {
      --bg: #101418;
      --card: #1b2128;
      --ink: #e8ecef;
      --muted: #8a96a3;
      --accent: #ff7a45;
    }

    body {
      margin: 0;
      font-family: system-ui, sans-serif;
      background: var(--bg);
      color: var(--ink);
    }

    main {
      max-width: 880px;
      margin: 0 auto;
      padding: 32px 20px;
      display: grid;
      gap: 16px;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
    }

    .wide {
      grid-column: 1 / -1;
    }

    .big {
      font-size: 2.4rem;
      font-weight: 600;
    }

    .muted {
      color: var(--muted);
    }

    .track {
      height: 8px;
      border-radius: 4px;
      background: #2a323b;
      overflow: hidden;
    }

    .fill,
    .bar {
      display: block;
      height: 8px;
      border-radius: 4px;
      background: var(--accent);
    }

    .row {
      display: grid;
      grid-template-columns: 48px 1fr 160px;
      align-items: center;
      gap: 8px;
      margin: 6px 0;
    }

    button {
      margin-top: 12px;
      border: 0;
      border-radius: 8px;
      padding: 8px 14px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main>
    <section class="card wide">
      <div class="muted">{{DATE}}</div>
      <p class="big">&ldquo;{{QUOTE}}&rdquo;</p>
    </section>

    <section class="card">
      <div class="muted">Current streak</div>
      <div class="big">{{STREAK}} days</div>
    </section>

    <section class="card">
      <div class="muted">Water</div>
      <div class="big">{{WATER}}ml</div>
      <div class="track"><span class="fill" style="width: {{WATER_PCT}}%"></span></div>
      <div class="muted">{{WATER}}ml / {{WATER_GOAL}}ml</div>
      <form method="post" action="/water/add">
        <button type="submit">+ 250ml</button>
      </form>
    </section>

    <section class="card">
      <div class="muted">Calories eaten</div>
      <div class="big">{{CALORIES}}</div>
      <div class="muted">Target: {{CALORIE_TARGET}} cal &middot; {{CALORIE_NOTE}}</div>
    </section>

    <section class="card">
      <div class="muted">BMI</div>
      <div class="big">{{BMI}}</div>
      <div class="muted">{{BMI_CATEGORY}}</div>
    </section>

    <section class="card">
      <div class="muted">Goals completed</div>
      <div class="big">{{GOALS}}</div>
    </section>

    <section class="card wide">
      <div class="muted">Last 7 days</div>
      {{WEEK_ROWS}}
    </section>
  </main>
</body>
</html>
"#;
