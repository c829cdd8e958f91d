//! The demo HTML form.
//!
//! A small self-contained page that posts to the JSON endpoint, for
//! poking at the service without a separate front end.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::AppState;

const INDEX_HTML: &str = r#"<!doctype html>
<title>High-precision sqrt (Newton / Reciprocal)</title>
<style>
  body { font-family: system-ui, -apple-system, Roboto, "Segoe UI", Arial; padding: 24px; max-width: 900px; }
  label { display:block; margin-top: 8px; }
  input, select { width: 100%; padding: 8px; box-sizing: border-box; }
  button { margin-top: 12px; padding: 10px 16px; }
  pre { background:#f7f7f8; padding:12px; overflow:auto }
</style>
<h2>High-precision sqrt (Newton / Reciprocal)</h2>
<form id="form">
  <label>Number (decimal)</label>
  <input id="number" value="2">

  <label>Precision (decimal digits)</label>
  <input id="precisionDigits" value="__DEFAULT_PRECISION__">

  <label>Iterations</label>
  <input id="iterations" value="__DEFAULT_ITERATIONS__">

  <label>Method</label>
  <select id="method">
    <option value="heron">heron (Newton)</option>
    <option value="recip">reciprocal-sqrt</option>
  </select>

  <label>Initial guess mode</label>
  <select id="initMode">
    <option value="auto">auto</option>
    <option value="manual">manual</option>
  </select>

  <label>Initial guess value (decimal string, used only if manual)</label>
  <input id="initValue" placeholder="optional">

  <label><input type="checkbox" id="includeIterations" checked> Include per-iteration table in response</label>
  <label><input type="checkbox" id="saveCsv"> Return iteration CSV as downloadable attachment</label>

  <button type="button" onclick="submitForm()">Compute sqrt</button>
</form>

<h3>Result</h3>
<pre id="output">Waiting...</pre>

<script>
async function submitForm(){
  const body = {
    number: document.getElementById('number').value,
    precisionDigits: parseInt(document.getElementById('precisionDigits').value),
    iterations: parseInt(document.getElementById('iterations').value),
    method: document.getElementById('method').value,
    initMode: document.getElementById('initMode').value,
    includeIterations: document.getElementById('includeIterations').checked,
    saveCsv: document.getElementById('saveCsv').checked
  };
  const initValue = document.getElementById('initValue').value;
  if (initValue.length > 0) { body.initValue = initValue; }
  const output = document.getElementById('output');
  output.textContent = "Computing...";
  try {
    const resp = await fetch('/api/v1/sqrt', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body),
    });
    if (!resp.ok) {
      const txt = await resp.text();
      output.textContent = "ERROR: " + resp.status + " - " + txt;
      return;
    }
    const contentType = resp.headers.get('Content-Type') || '';
    if (contentType.startsWith('text/csv')) {
      const blob = await resp.blob();
      const url = URL.createObjectURL(blob);
      const a = document.createElement('a');
      a.href = url; a.download = 'iterations.csv'; a.textContent = 'Download CSV';
      output.innerHTML = ''; output.appendChild(a);
      return;
    }
    const data = await resp.json();
    output.textContent = JSON.stringify(data, null, 2);
  } catch (e) {
    output.textContent = "Exception: " + e.toString();
  }
}
</script>
"#;

/// Build the index routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// GET / - the demo form, with the configured defaults filled in
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let page = INDEX_HTML
        .replace(
            "__DEFAULT_PRECISION__",
            &state.config.default_precision_digits.to_string(),
        )
        .replace(
            "__DEFAULT_ITERATIONS__",
            &state.config.default_iterations.to_string(),
        );
    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_serves_form_with_defaults() {
        let mut config = ServerConfig::default();
        config.default_precision_digits = 123;
        config.default_iterations = 7;
        let router = routes().with_state(AppState::new(Arc::new(config)));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("value=\"123\""));
        assert!(html.contains("value=\"7\""));
        assert!(html.contains("/api/v1/sqrt"));
        assert!(!html.contains("__DEFAULT_PRECISION__"));
    }
}
