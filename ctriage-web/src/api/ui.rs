//! UI Routes - HTML page for the ctriage web interface
//!
//! Plain HTML/CSS/JS (no frameworks). The page only talks to the JSON API:
//! it never classifies, counts or filters on its own.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}

/// Root page - single comment and batch upload tabs
async fn root_page() -> impl IntoResponse {
    Html(ROOT_PAGE)
}

const ROOT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Comment Triage</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 1000px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.5;
            color: #222;
        }
        h1 {
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        .tabs button {
            padding: 8px 18px;
            border: 1px solid #0066cc;
            background: white;
            color: #0066cc;
            cursor: pointer;
        }
        .tabs button.active { background: #0066cc; color: white; }
        .pane { display: none; margin-top: 20px; }
        .pane.active { display: block; }
        textarea { width: 100%; min-height: 90px; }
        .button {
            padding: 8px 18px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
        .button:disabled { background: #99b8d9; cursor: wait; }
        table { width: 100%; border-collapse: collapse; margin-top: 12px; }
        th, td { border-bottom: 1px solid #ddd; padding: 6px; text-align: left; vertical-align: top; }
        .badge {
            display: inline-block;
            padding: 2px 8px;
            border-radius: 10px;
            font-size: 0.85em;
            background: #777;
            color: white;
            white-space: nowrap;
        }
        .badge.praise { background: #2e7d32; }
        .badge.support { background: #00897b; }
        .badge.constructive_criticism { background: #f9a825; color: #222; }
        .badge.hate_abuse { background: #c62828; }
        .badge.threat { background: #6a1b9a; }
        .badge.emotional { background: #ad1457; }
        .badge.spam_irrelevant { background: #616161; }
        .badge.question_suggestion { background: #1565c0; }
        .bar-row { display: flex; align-items: center; margin: 4px 0; }
        .bar-label { width: 200px; }
        .bar { height: 18px; background: #0066cc; margin-right: 8px; }
        .muted { color: #777; font-size: 0.9em; }
        .toolbar { margin-top: 16px; display: flex; gap: 12px; align-items: center; }
    </style>
</head>
<body>
    <h1>Comment Triage</h1>
    <div class="tabs">
        <button id="tab-single" class="active" onclick="showPane('single')">Single Comment</button>
        <button id="tab-batch" onclick="showPane('batch')">Batch Upload</button>
    </div>

    <section id="pane-single" class="pane active">
        <textarea id="single-input" placeholder="Paste a comment..."></textarea>
        <p><button id="single-submit" class="button" onclick="submitSingle()">Classify</button></p>
        <div id="single-results"></div>
    </section>

    <section id="pane-batch" class="pane">
        <p>Upload a text or CSV file with one comment per line. A header row is skipped;
           at most 200 comments are classified per upload.</p>
        <input type="file" id="batch-file" accept=".csv,.txt,text/csv,text/plain">
        <button id="batch-submit" class="button" onclick="submitBatch()">Classify File</button>
        <p id="batch-summary" class="muted"></p>
        <div id="batch-chart"></div>
        <div class="toolbar">
            <label>Category
                <select id="batch-filter" onchange="refreshPane('batch')">
                    <option value="all">All</option>
                </select>
            </label>
            <a id="batch-export" class="button" href="/api/panes/batch/export?category=all">Export CSV</a>
        </div>
        <div id="batch-results"></div>
    </section>

    <p><small>Module: ctriage-web</small></p>

    <script>
        const labels = {};

        async function loadCategories() {
            const res = await fetch('/api/categories');
            const categories = await res.json();
            const select = document.getElementById('batch-filter');
            for (const c of categories) {
                labels[c.id] = c.label;
                const opt = document.createElement('option');
                opt.value = c.id;
                opt.textContent = c.label;
                select.appendChild(opt);
            }
        }

        function showPane(name) {
            for (const p of ['single', 'batch']) {
                document.getElementById('pane-' + p).classList.toggle('active', p === name);
                document.getElementById('tab-' + p).classList.toggle('active', p === name);
            }
        }

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        function badge(category) {
            const known = Object.prototype.hasOwnProperty.call(labels, category);
            const cls = known ? category : '';
            return `<span class="badge ${cls}">${escapeHtml(known ? labels[category] : category)}</span>`;
        }

        function renderTable(target, results) {
            if (!results.length) {
                target.innerHTML = '<p class="muted">No results.</p>';
                return;
            }
            const rows = results.map(r =>
                `<tr><td>${escapeHtml(r.original_text)}</td><td>${badge(r.category)}</td>` +
                `<td>${escapeHtml(r.reply)}</td></tr>`).join('');
            target.innerHTML =
                '<table><thead><tr><th>Comment</th><th>Category</th><th>Suggested Reply</th></tr></thead>' +
                `<tbody>${rows}</tbody></table>`;
        }

        function renderChart(target, stats) {
            const max = stats.reduce((m, s) => Math.max(m, s.count), 0);
            target.innerHTML = stats.map(s => {
                const width = max ? Math.round(400 * s.count / max) : 0;
                return `<div class="bar-row"><span class="bar-label">${badge(s.category)}</span>` +
                       `<span class="bar" style="width:${width}px"></span>${s.count}</div>`;
            }).join('');
        }

        async function postJson(url, body) {
            const res = await fetch(url, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            if (!res.ok) {
                let message = res.statusText || `HTTP ${res.status}`;
                try {
                    const data = await res.json();
                    if (data.error) message = data.error.message;
                } catch (_) {
                    // non-JSON error body
                }
                throw new Error(message);
            }
            return res.json();
        }

        async function submitSingle() {
            const comment = document.getElementById('single-input').value;
            if (!comment.trim()) return;
            const button = document.getElementById('single-submit');
            button.disabled = true;
            try {
                const data = await postJson('/api/classify/single', { comment });
                if (!data.skipped) {
                    renderTable(document.getElementById('single-results'), data.results);
                }
            } catch (err) {
                alert('Classification failed: ' + err.message);
            } finally {
                button.disabled = false;
            }
        }

        async function submitBatch() {
            const file = document.getElementById('batch-file').files[0];
            if (!file) return;
            const button = document.getElementById('batch-submit');
            button.disabled = true;
            try {
                const content = await file.text();
                const data = await postJson('/api/classify/batch', { content });
                const s = data.ingestion;
                document.getElementById('batch-summary').textContent = data.skipped
                    ? 'No comments found in file.'
                    : `${s.forwarded} comments classified` +
                      (s.header_dropped ? ' (header skipped)' : '') +
                      (s.truncated ? `, ${s.truncated} lines over the limit ignored` : '');
                document.getElementById('batch-filter').value = 'all';
                await refreshPane('batch');
            } catch (err) {
                alert('Classification failed: ' + err.message);
            } finally {
                button.disabled = false;
            }
        }

        async function refreshPane(name) {
            const selector = document.getElementById(name + '-filter').value;
            const query = '?category=' + encodeURIComponent(selector);
            const res = await fetch(`/api/panes/${name}${query}`);
            const data = await res.json();
            renderChart(document.getElementById(name + '-chart'), data.stats);
            renderTable(document.getElementById(name + '-results'), data.results);
            document.getElementById(name + '-export').href = `/api/panes/${name}/export${query}`;
        }

        loadCategories();
    </script>
</body>
</html>
"#;
