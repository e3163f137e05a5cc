use axum::response::{Html, IntoResponse};

/// Static status page. The record count is filled in by the browser from
/// `GET /api/telemetry/count`.
const STATUS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Telemetry Service</title>
</head>
<body>
  <h1>Temperature &amp; Humidity Telemetry</h1>
  <p><strong>Status:</strong> API running</p>
  <p><strong>POST:</strong> /api/telemetry</p>
  <p><strong>GET:</strong> /api/telemetry</p>
  <p><strong>GET:</strong> /api/telemetry/count</p>
  <p><strong>Total records:</strong> <span id="count">loading...</span></p>

  <script>
    fetch('/api/telemetry/count')
      .then(r => r.json())
      .then(d => document.getElementById('count').textContent = d.total_records)
      .catch(() => document.getElementById('count').textContent = 'unavailable');
  </script>
</body>
</html>
"#;

pub async fn status_page() -> impl IntoResponse {
    Html(STATUS_HTML)
}
