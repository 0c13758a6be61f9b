//! String templates for the admin pages. Every piece of dynamic text passes
//! through [`html_escape`] before it reaches markup; item names are
//! user-supplied and hostile until proven otherwise.

use slate_common::{master_title, MasterItem};

use crate::chrome::Chrome;

/// Replace the five HTML-significant characters with entity references.
/// Applied to attribute values and text content alike.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Render the master list region: a numbered table of items with their row
/// actions, or the placeholder when there is nothing to show.
pub fn master_list(category: &str, items: &[MasterItem]) -> String {
    if items.is_empty() {
        return r#"<div class="alert alert-light text-center mb-0">No records found.</div>"#
            .to_string();
    }

    let safe_category = html_escape(category);
    let mut rows = String::new();
    for (idx, item) in items.iter().enumerate() {
        let safe_name = html_escape(&item.name);
        let safe_id = html_escape(&item.id);
        rows.push_str(&format!(
            r#"
      <tr>
        <td>{n}</td>
        <td>{safe_name}</td>
        <td class="text-center">
          <button class="btn btn-sm btn-outline-info me-1" onclick="openMasterEdit('{safe_category}', '{safe_id}', '{safe_name}')">Edit</button>
          <button class="btn btn-sm btn-outline-danger" onclick="deleteMasterItem('{safe_category}', '{safe_id}')">Delete</button>
        </td>
      </tr>"#,
            n = idx + 1,
        ));
    }

    format!(
        r#"<table class="table table-hover align-middle mb-0">
    <thead class="table-light">
      <tr><th style="width:60px;">#</th><th>Name</th><th class="text-center" style="width:160px;">Actions</th></tr>
    </thead>
    <tbody>{rows}
    </tbody>
</table>"#
    )
}

/// Render a full master admin page: heading, add form, list region, and the
/// edit dialog markup.
pub fn master_page(category: &str, chrome: &Chrome, list_html: &str) -> String {
    let title = master_title(category);
    let safe_title = html_escape(&title);
    let safe_category = html_escape(category);

    let content = format!(
        r#"<div class="container" style="padding:24px;">
    <h2 style="margin-bottom:16px;">{safe_title} Master</h2>
    <form id="masterForm" class="row g-2 mb-3" onsubmit="addMasterItem(event)">
        <div class="col-auto"><input type="text" name="name" class="form-control" placeholder="New {safe_title}" /></div>
        <div class="col-auto"><button type="submit" class="btn btn-primary">Add</button></div>
    </form>
    <div class="card"><div class="card-body p-0" id="masterList">{list_html}</div></div>
</div>
<div class="modal fade" id="editModal" tabindex="-1">
    <div class="modal-dialog"><div class="modal-content">
        <form id="editForm" onsubmit="updateMasterItem(event)">
            <div class="modal-header"><h5 class="modal-title">Edit {safe_title}</h5></div>
            <div class="modal-body">
                <input type="hidden" name="id" id="edit-id" />
                <input type="text" name="name" id="edit-name" class="form-control" />
            </div>
            <div class="modal-footer">
                <button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Cancel</button>
                <button type="submit" class="btn btn-primary">Save</button>
            </div>
        </form>
    </div></div>
</div>
<script>const masterName = '{safe_category}';</script>"#
    );

    build_page(&title, chrome, &content)
}

// --- Helpers ---

fn render_sidebar(chrome: &Chrome) -> String {
    let mut html = format!(
        r#"<div class="sidebar{}" id="sidebar">"#,
        if chrome.is_sidebar_open() { " show" } else { "" }
    );

    for link in chrome.links() {
        html.push_str(&format!(
            r#"
    <a href="{href}" class="erp-link{active}">{label}</a>"#,
            href = html_escape(&link.href),
            active = if link.is_active() { " active" } else { "" },
            label = html_escape(&link.label),
        ));
    }

    for section in chrome.sections() {
        let (shown, rotated) = if section.is_expanded() {
            (" show", " rotate")
        } else {
            ("", "")
        };
        html.push_str(&format!(
            r#"
    <button class="dropdown-btn">{label} <span class="arrow{rotated}">&#9662;</span></button>
    <div class="dropdown-container{shown}">"#,
            label = html_escape(&section.label),
        ));
        for link in section.links() {
            html.push_str(&format!(
                r#"
        <a href="{href}" class="erp-link{active}">{label}</a>"#,
                href = html_escape(&link.href),
                active = if link.is_active() { " active" } else { "" },
                label = html_escape(&link.label),
            ));
        }
        html.push_str(
            r#"
    </div>"#,
        );
    }

    html.push_str("\n</div>");
    html
}

fn build_page(title: &str, chrome: &Chrome, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — School ERP</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
<style>
body{{display:flex;min-height:100vh;background:#f6f7fb;}}
.sidebar{{width:230px;background:#1a1a2e;color:#eee;padding:16px 0;flex-shrink:0;}}
.sidebar a.erp-link{{display:block;color:#ccc;padding:8px 20px;text-decoration:none;font-size:14px;}}
.sidebar a.erp-link:hover{{color:#fff;background:#16213e;}}
.sidebar a.erp-link.active{{color:#fff;background:#0f3460;border-left:3px solid #53a8ff;}}
.dropdown-btn{{display:block;width:100%;text-align:left;background:none;border:none;color:#ccc;padding:8px 20px;font-size:14px;cursor:pointer;}}
.dropdown-container{{display:none;background:#16213e;}}
.dropdown-container.show{{display:block;}}
.arrow{{float:right;transition:transform .15s;}}
.arrow.rotate{{transform:rotate(180deg);}}
main{{flex:1;}}
</style>
</head>
<body>
{sidebar}
<main>
{content}
</main>
</body>
</html>"#,
        title = html_escape(title),
        sidebar = render_sidebar(chrome),
    )
}
