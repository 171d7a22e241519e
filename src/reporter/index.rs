use super::layout::{Alert, Layout};
use super::RenderOptions;
use crate::utils::escape_html;

/// Landing page with the scan form and an optional error alert.
pub fn render_index(options: &RenderOptions, error: Option<&str>) -> String {
    let alert = error.map(|msg| Alert::error(msg).render()).unwrap_or_default();

    let content = format!(
        r#"        <header class="page-header">
            <h1>{brand}</h1>
            <p class="subtitle">Check the quality of any website in seconds.</p>
        </header>
        {alert}
        <section class="card scan-card">
            <form method="post" action="{action}" class="scan-form">
                <label for="url">Website URL</label>
                <div class="scan-row">
                    <input type="text" id="url" name="url" placeholder="https://example.com" required>
                    <button type="submit" class="btn btn-primary">Scan Website</button>
                </div>
            </form>
        </section>"#,
        brand = escape_html(&options.brand),
        alert = alert,
        action = escape_html(&options.form_action),
    );

    Layout::new(&options.brand)
        .styles(INDEX_CSS)
        .content(&content)
        .render()
}

const INDEX_CSS: &str = r#"        .page-header { text-align: center; margin: 2rem 0; }
        .page-header h1 { color: var(--primary); font-size: 2rem; }
        .subtitle { color: var(--text-dim); }
        .scan-form label { display: block; font-weight: 600; margin-bottom: 0.5rem; }
        .scan-row { display: flex; gap: 0.75rem; }
        .scan-row input {
            flex: 1;
            padding: 0.7rem 0.9rem;
            border: 1px solid var(--border);
            border-radius: 8px;
            font-size: 1rem;
        }
        .btn {
            padding: 0.7rem 1.4rem;
            border: none;
            border-radius: 8px;
            font-weight: 600;
            cursor: pointer;
        }
        .btn-primary { background: var(--primary); color: #fff; }"#;
