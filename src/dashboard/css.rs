//! Dashboard CSS styles
//!
//! `STYLES` themes the shell with CSS custom properties. `LAYOUT_STYLES`
//! holds the spacing fragments for the chart grid and stack.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0e1117;
    --sidebar: #262730;
    --card: #161b22;
    --border: #30363d;
    --text: #fafafa;
    --text-dim: #a3a8b4;
    --accent: #ff4b4b;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

.app { display: flex; min-height: 100vh; }

/* Sidebar */
.sidebar {
    width: 244px;
    flex-shrink: 0;
    padding: 48px 20px;
    background: var(--sidebar);
}

.sidebar h1 { font-size: 26px; font-weight: 700; margin-bottom: 24px; }

.page-select { display: flex; flex-direction: column; gap: 10px; }

.nav-label { font-size: 14px; color: var(--text-dim); margin-bottom: 4px; }

.page-link {
    display: flex;
    align-items: center;
    gap: 10px;
    color: var(--text);
    text-decoration: none;
    font-size: 14px;
}

.radio {
    width: 16px;
    height: 16px;
    border-radius: 50%;
    border: 1px solid var(--text-dim);
}

.page-link.active .radio {
    border: 5px solid var(--accent);
    background: var(--text);
}

.page-link:hover { color: var(--accent); }

/* Main area */
.main { flex: 1; padding: 48px 64px; min-width: 0; }

.main header { margin-bottom: 24px; }

.main h2 { font-size: 20px; font-weight: 600; color: var(--text-dim); }

.chart-row { display: flex; gap: 16px; }

.column { flex: 1; min-width: 0; }

.chart { width: 100%; }

.chart-error {
    padding: 16px;
    border: 1px solid var(--accent);
    border-radius: 6px;
    color: var(--accent);
    font-size: 13px;
}

@media (max-width: 768px) {
    .app { flex-direction: column; }
    .sidebar { width: 100%; padding: 24px 20px; }
    .main { padding: 24px 16px; }
    .chart-row { flex-direction: column; }
}
";

pub const LAYOUT_STYLES: &str = r"
.row-separator {
    margin-bottom: 50px !important;
}
.row-container {
    display: flex;
    flex-direction: column;
}
.chart-container {
    margin-bottom: 20px;
}
";
