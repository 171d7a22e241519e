//! Page shell shared by every view.
//!
//! A view fills four slots (title, extra styles, content, extra scripts) and
//! the shell wraps them in a complete document with the global design tokens
//! and the dismissible-alert behaviour.

use crate::utils::escape_html;

/// Severity of an alert box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub const fn css_class(self) -> &'static str {
        match self {
            AlertLevel::Info => "alert-info",
            AlertLevel::Success => "alert-success",
            AlertLevel::Warning => "alert-warning",
            AlertLevel::Error => "alert-error",
        }
    }
}

/// A dismissible message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message)
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="alert {}" role="alert" data-dismissible>
            <span class="alert-message">{}</span>
            <button type="button" class="alert-close" aria-label="Dismiss">&times;</button>
        </div>"#,
            self.level.css_class(),
            escape_html(&self.message)
        )
    }
}

/// Named slots of the page shell. Unset slots render empty.
#[derive(Debug, Clone, Default)]
pub struct Layout<'a> {
    pub title: &'a str,
    pub styles: Option<&'a str>,
    pub content: &'a str,
    pub scripts: Option<&'a str>,
}

impl<'a> Layout<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    pub fn styles(mut self, styles: &'a str) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn content(mut self, content: &'a str) -> Self {
        self.content = content;
        self
    }

    pub fn scripts(mut self, scripts: &'a str) -> Self {
        self.scripts = Some(scripts);
        self
    }

    pub fn render(&self) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{base_css}
    </style>
    <style>
{styles}
    </style>
</head>
<body>
    <main class="container">
{content}
    </main>
    <script>
{alert_js}
    </script>
{scripts}
</body>
</html>"##,
            title = escape_html(self.title),
            base_css = BASE_CSS,
            styles = self.styles.unwrap_or_default(),
            content = self.content,
            alert_js = ALERT_JS,
            scripts = self.scripts.unwrap_or_default(),
        )
    }
}

const BASE_CSS: &str = r#"        * { margin: 0; padding: 0; box-sizing: border-box; }

        :root {
            --primary: #2a5caa;
            --primary-light: #d9e1f2;
            --bg: #f5f7fb;
            --bg-card: #ffffff;
            --border: #e1e6ef;
            --text: #1f2933;
            --text-dim: #6b7280;

            --good: #27ae60;
            --warning: #f1c40f;
            --critical: #e74c3c;
            --info: #3498db;

            --radius: 12px;
            --shadow: 0 2px 8px rgba(15, 23, 42, 0.08);
            --font-sans: "Segoe UI", Roboto, -apple-system, BlinkMacSystemFont, Arial, sans-serif;
        }

        body {
            font-family: var(--font-sans);
            background: var(--bg);
            color: var(--text);
            line-height: 1.55;
        }

        a { color: var(--primary); }

        .container {
            max-width: 1100px;
            margin: 0 auto;
            padding: 2rem 1.25rem;
        }

        .card {
            background: var(--bg-card);
            border: 1px solid var(--border);
            border-radius: var(--radius);
            box-shadow: var(--shadow);
            padding: 1.25rem 1.5rem;
            margin-bottom: 1.5rem;
        }

        .alert {
            display: flex;
            align-items: flex-start;
            justify-content: space-between;
            gap: 1rem;
            padding: 0.85rem 1rem;
            border-radius: 8px;
            margin-bottom: 1rem;
            border-left: 4px solid var(--info);
            background: #eaf4fc;
        }
        .alert-success { border-left-color: var(--good); background: #e9f7ef; }
        .alert-warning { border-left-color: var(--warning); background: #fef9e7; }
        .alert-error { border-left-color: var(--critical); background: #fdedec; }
        .alert-close {
            border: none;
            background: transparent;
            font-size: 1.25rem;
            line-height: 1;
            cursor: pointer;
            color: var(--text-dim);
        }"#;

const ALERT_JS: &str = r#"        // Binds dismiss buttons on alerts under `root`. Runs once at load; call
        // again after injecting new alerts. Already bound alerts are skipped.
        function initDismissibleAlerts(root) {
            (root || document).querySelectorAll('[data-dismissible]').forEach(function (alert) {
                if (alert.dataset.dismissBound) {
                    return;
                }
                alert.dataset.dismissBound = '1';
                var close = alert.querySelector('.alert-close');
                if (close) {
                    close.addEventListener('click', function () {
                        alert.remove();
                    });
                }
            });
        }
        document.addEventListener('DOMContentLoaded', function () {
            initDismissibleAlerts(document);
        });"#;
