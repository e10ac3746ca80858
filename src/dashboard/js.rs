//! Dashboard JavaScript
//!
//! Embeds every chart spec with vega-embed. `CHART_SPECS` is defined by the
//! page shell before this script runs; chart `i` renders into `#chart-i`.

pub const SCRIPT: &str = r"
// ============================================================================
// Configuration
// ============================================================================
const EMBED_OPTIONS = {
    actions: false,
    theme: 'dark',
    renderer: 'svg'
};

// ============================================================================
// Rendering
// ============================================================================
function showError(el, err) {
    console.error('Chart render failed:', err);
    el.innerHTML = '';
    const box = document.createElement('div');
    box.className = 'chart-error';
    box.textContent = 'Chart failed to render: ' + (err && err.message ? err.message : err);
    el.appendChild(box);
}

function renderCharts(specs) {
    specs.forEach((spec, i) => {
        const el = document.getElementById('chart-' + i);
        if (!el) return;
        vegaEmbed(el, spec, EMBED_OPTIONS).catch(err => showError(el, err));
    });
}

document.addEventListener('DOMContentLoaded', () => renderCharts(CHART_SPECS));
";
