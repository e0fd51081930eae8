use axum::{
    extract::{Query as UrlQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::engine::query::{DTM_BOUNDS, WIN_PROB_BOUNDS};
use crate::engine::{
    self, BetSelection, BetType, FavUnderdog, Query, SpreadOutcome, TotalsOutcome,
};
use crate::records::{HomeAway, Record};
use crate::sources::LoadReport;

/// Records are loaded and normalized once at startup; every request only reads them.
pub struct AppState {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/models", get(models_handler))
        .route("/api/sources", get(sources_handler))
        .route("/api/evaluate", get(evaluate_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Flat form parameters of `/api/evaluate`; anything omitted takes the form default.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EvaluateParams {
    pub model: Option<String>,
    pub bet_type: BetType,
    pub spread_outcome: SpreadOutcome,
    pub fav_underdog: FavUnderdog,
    pub totals_outcome: TotalsOutcome,
    pub home_away: HomeAway,
    pub win_prob_min: f64,
    pub win_prob_max: f64,
    pub dtm_min: f64,
    pub dtm_max: f64,
    pub include_spread: bool,
}

impl Default for EvaluateParams {
    fn default() -> Self {
        EvaluateParams {
            model: None,
            bet_type: BetType::SpreadWin,
            spread_outcome: SpreadOutcome::Both,
            fav_underdog: FavUnderdog::Favorite,
            totals_outcome: TotalsOutcome::Over,
            home_away: HomeAway::Both,
            win_prob_min: *WIN_PROB_BOUNDS.start(),
            win_prob_max: *WIN_PROB_BOUNDS.end(),
            dtm_min: *DTM_BOUNDS.start(),
            dtm_max: *DTM_BOUNDS.end(),
            include_spread: true,
        }
    }
}

impl EvaluateParams {
    fn into_query(self, model_name: String) -> Query {
        let selection = BetSelection::from_options(
            self.bet_type,
            self.spread_outcome,
            self.fav_underdog,
            self.totals_outcome,
            self.home_away,
        );
        Query {
            win_prob_range: self.win_prob_min..=self.win_prob_max,
            dtm_range: self.dtm_min..=self.dtm_max,
            include_spread: self.include_spread,
            ..Query::new(model_name, selection)
        }
    }
}

async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/models
async fn models_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(engine::model_names(&state.records))
}

/// GET /api/sources
async fn sources_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.report.clone())
}

/// GET /api/evaluate?model=BigMoney&bet_type=spread-win&spread_outcome=favorite
async fn evaluate_handler(
    State(state): State<Arc<AppState>>,
    UrlQuery(params): UrlQuery<EvaluateParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let model_name = match params.model.clone() {
        Some(model) => model,
        None => engine::model_names(&state.records)
            .into_iter()
            .next()
            .unwrap_or_default(),
    };
    let query = params.into_query(model_name);
    query
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(engine::evaluate(&state.records, &query)))
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Smart Bet Calculator</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  form { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; }
  label { display: grid; gap: .3rem; color: var(--muted); font-size: .8rem; text-transform: uppercase; }
  select, input { background: var(--card); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .45rem; }
  .hidden { display: none; }
  .stats-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; }
  .stat-card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  .stat-card .label { color: var(--muted); font-size: .8rem; text-transform: uppercase; margin-bottom: .4rem; }
  .stat-card .value { font-size: 1.7rem; font-weight: 700; }
  .verdict { padding: 1rem; border-radius: 10px; font-weight: 700; }
  .verdict.smart { background: var(--green); color: #000; }
  .verdict.not { background: var(--card); border: 1px solid var(--border); }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: auto; max-height: 480px; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .55rem 1rem; font-size: .85rem; border-bottom: 1px solid #1e2130; }
  .error { color: var(--red); }
  .note { color: var(--muted); font-size: .85rem; line-height: 1.5; }
</style>
</head>
<body>
<header><h1>Smart Bet Calculator</h1></header>
<main>
  <form id="query">
    <label>Model <select name="model" id="model"></select></label>
    <label>Bet Type
      <select name="bet_type" id="bet_type">
        <option value="spread-win">Spread Win</option>
        <option value="moneyline-win">Moneyline Win</option>
        <option value="over-win">Over Win</option>
      </select>
    </label>
    <label data-for="spread-win">Spread Outcome
      <select name="spread_outcome"><option value="favorite">Favorite</option><option value="underdog">Underdog</option><option value="both" selected>Both</option></select>
    </label>
    <label data-for="moneyline-win">Favorite/Underdog
      <select name="fav_underdog"><option value="favorite">Favorite</option><option value="underdog">Underdog</option></select>
    </label>
    <label data-for="over-win">Totals Outcome
      <select name="totals_outcome"><option value="over">Over</option><option value="under">Under</option></select>
    </label>
    <label data-for="spread-win moneyline-win">Home/Away
      <select name="home_away"><option value="home">Home</option><option value="away">Away</option><option value="both" selected>Both</option></select>
    </label>
    <label>Win Prob Min (%) <input type="number" name="win_prob_min" min="0" max="100" value="0"></label>
    <label>Win Prob Max (%) <input type="number" name="win_prob_max" min="0" max="100" value="100"></label>
    <label>DTM Min (%) <input type="number" name="dtm_min" min="-100" max="100" value="-100"></label>
    <label>DTM Max (%) <input type="number" name="dtm_max" min="-100" max="100" value="100"></label>
    <label>Include Spread <input type="checkbox" id="include_spread" checked></label>
  </form>
  <div id="error" class="error"></div>
  <div class="stats-grid">
    <div class="stat-card"><div class="label">Total Bets</div><div class="value" id="total">–</div></div>
    <div class="stat-card"><div class="label">Total Wins</div><div class="value" id="wins">–</div></div>
    <div class="stat-card"><div class="label">Total Losses</div><div class="value" id="losses">–</div></div>
    <div class="stat-card"><div class="label">Win Percentage</div><div class="value" id="pct">–</div></div>
  </div>
  <div id="verdict" class="verdict not">–</div>
  <div class="panel">
    <table>
      <thead><tr><th>Bet Type</th><th>Home/Away</th><th>Spread</th><th>Win Prob</th><th>DTM</th><th>ROI %</th><th>Result</th><th>Bet</th></tr></thead>
      <tbody id="records"></tbody>
    </table>
  </div>
  <p class="note">
    Spread Win: Favorite keeps negative spreads, Underdog positive ones, Both every nonzero spread.<br>
    Over Win: the totals outcome filters totals bets by their predicted winner (or bet text).<br>
    Moneyline Win: Favorite means win probability above 50%, Underdog 50% or below.<br>
    No spread bets? Check that the source's spread column has nonzero values.
  </p>
</main>
<script>
const form = document.getElementById('query');

function syncVisibility() {
  const bt = document.getElementById('bet_type').value;
  document.querySelectorAll('[data-for]').forEach(el => {
    el.classList.toggle('hidden', !el.dataset.for.split(' ').includes(bt));
  });
}

async function loadModels() {
  const r = await fetch('/api/models');
  const models = await r.json();
  const sel = document.getElementById('model');
  sel.replaceChildren(...models.map(m => {
    const opt = document.createElement('option');
    opt.textContent = m;
    return opt;
  }));
}

async function evaluate() {
  const params = new URLSearchParams(new FormData(form));
  params.set('include_spread', document.getElementById('include_spread').checked);
  const r = await fetch('/api/evaluate?' + params.toString());
  const err = document.getElementById('error');
  if (!r.ok) { err.textContent = await r.text(); return; }
  err.textContent = '';
  const ev = await r.json();
  document.getElementById('total').textContent = ev.stats.total;
  document.getElementById('wins').textContent = ev.stats.wins;
  document.getElementById('losses').textContent = ev.stats.losses;
  document.getElementById('pct').textContent = ev.stats.win_percentage.toFixed(2) + '%';
  const v = document.getElementById('verdict');
  v.textContent = ev.smart_bet ? 'Smart Bet!' : 'Not a Smart Bet';
  v.className = 'verdict ' + (ev.smart_bet ? 'smart' : 'not');
  document.getElementById('records').replaceChildren(...ev.records.map(r => {
    const tr = document.createElement('tr');
    for (const value of [r.bet_type, r.home_away, r.auto_spread, r.win_probability,
                         r.dtm, r.roi_percent, r.bet_result, r.bet_text]) {
      const td = document.createElement('td');
      td.textContent = value ?? '';
      tr.appendChild(td);
    }
    return tr;
  }));
}

form.addEventListener('change', () => { syncVisibility(); evaluate(); });
syncVisibility();
loadModels().then(evaluate);
</script>
</body>
</html>
"#;
