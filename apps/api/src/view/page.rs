//! Server-rendered user listing page.
//!
//! Every link and form target comes from `PagerController`: a control is
//! rendered enabled only when the event it stands for would fetch a page.

use crate::models::user::User;
use crate::users::pagination::{PageRequest, UserPage, PAGE_SIZE_OPTIONS};
use crate::view::controller::{Event, Mode, Notice, PagerController};
use crate::view::pager::PaginationView;

pub const EMAIL_FORM_ACTION: &str = "/users/email";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #ddd;padding:.5rem;text-align:left}\
.notice{padding:.5rem}.notice.saved{background:#e6f4ea}.notice.error{background:#fce8e6}\
.pagination{display:flex;gap:.5rem;align-items:center;margin-top:1rem}\
.pagination a,.pagination span.control{padding:.25rem .5rem;border:1px solid #ccc}\
.pagination .active{font-weight:bold;background:#eee}\
.pagination .disabled{color:#aaa}";

/// Unescaped listing URL, e.g. `/?page=2&pageSize=5`.
pub fn listing_url(req: PageRequest) -> String {
    format!("/?page={}&pageSize={}", req.page, req.page_size)
}

/// Renders the full HTML document for one page of users.
pub fn render_users_page(
    page: &UserPage,
    controller: &PagerController,
    notice: Option<&Notice>,
) -> String {
    let view = PaginationView::from_page(page);
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Pagination Demo</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>Users</h1>\n<p>These are the user data.</p>\n");

    match notice {
        Some(Notice::Saved) => {
            html.push_str("<p class=\"notice saved\">Saved successfully!</p>\n");
        }
        Some(Notice::SaveFailed(message)) => html.push_str(&format!(
            "<p class=\"notice error\">An error occurred while saving the changes: {}</p>\n",
            escape_html(message)
        )),
        None => {}
    }

    html.push_str("<table>\n<thead><tr><th>Name</th><th>Email</th><th>Created At</th><th>Updated At</th><th>Action</th></tr></thead>\n<tbody>\n");
    for user in &page.users {
        html.push_str(&format!(
            "<tr><td>{avatar}{name}</td>{email}<td>{created}</td><td>{updated}</td><td><a href=\"#\">View</a></td></tr>\n",
            avatar = user
                .avatar
                .as_deref()
                .map(|src| format!(
                    "<img src=\"{}\" alt=\"\" width=\"25\" height=\"25\"> ",
                    escape_html(src)
                ))
                .unwrap_or_default(),
            name = escape_html(&user.name),
            email = email_cell(user, controller),
            created = user.created_at.to_rfc3339(),
            updated = user.updated_at.to_rfc3339(),
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    render_controls(&mut html, &view, controller);

    html.push_str("</body>\n</html>\n");
    html
}

fn email_cell(user: &User, controller: &PagerController) -> String {
    let req = controller.request();
    match controller.mode() {
        Mode::Editing { id, draft } if *id == user.id => {
            let mut cancelled = controller.clone();
            cancelled.handle(Event::CancelEdit);
            format!(
                "<td class=\"email\"><form method=\"post\" action=\"{EMAIL_FORM_ACTION}\">\
<input type=\"hidden\" name=\"id\" value=\"{id}\">\
<input type=\"hidden\" name=\"current\" value=\"{draft}\">\
<input type=\"hidden\" name=\"page\" value=\"{page}\">\
<input type=\"hidden\" name=\"pageSize\" value=\"{size}\">\
<input type=\"email\" name=\"email\" value=\"{draft}\" autofocus> \
<button type=\"submit\">Save</button> <a href=\"{cancel}\">Cancel</a></form></td>",
                draft = escape_html(draft),
                page = req.page,
                size = req.page_size,
                cancel = escape_html(&listing_url(cancelled.request())),
            )
        }
        _ => format!(
            "<td class=\"email\"><a href=\"{href}\">{email}</a></td>",
            href = escape_html(&format!("{}&edit={}", listing_url(req), user.id)),
            email = escape_html(&user.email),
        ),
    }
}

fn render_controls(html: &mut String, view: &PaginationView, controller: &PagerController) {
    let current = controller.request();
    html.push_str("<div class=\"pagination\">\n");
    html.push_str(&format!("<p>{}</p>\n", view.summary()));

    html.push_str(&step_control(controller.fetch_target(Event::PrevPage), "&lsaquo;"));
    for (n, is_current) in view.page_numbers() {
        let target = controller.fetch_target(Event::GoToPage(n)).unwrap_or(current);
        html.push_str(&page_link(target, &n.to_string(), is_current));
        html.push('\n');
    }
    html.push_str(&step_control(controller.fetch_target(Event::NextPage), "&rsaquo;"));

    html.push_str("<select name=\"pageSize\" onchange=\"window.location.href=this.value\">\n");
    for option in PAGE_SIZE_OPTIONS {
        let target = controller
            .fetch_target(Event::SetPageSize(option))
            .unwrap_or(current);
        let selected = if option == current.page_size {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{selected}>{option}</option>\n",
            escape_html(&listing_url(target))
        ));
    }
    html.push_str("</select>\n");

    html.push_str(&format!(
        "<form method=\"get\" action=\"/\"><label for=\"pageNumber\">Goto</label> <input type=\"number\" id=\"pageNumber\" name=\"page\" min=\"1\" max=\"{}\"><input type=\"hidden\" name=\"pageSize\" value=\"{}\"></form>\n",
        view.pages.max(1),
        current.page_size
    ));
    html.push_str("</div>\n");
}

/// Prev/next control: a link when the controller would move, else disabled.
fn step_control(target: Option<PageRequest>, label: &str) -> String {
    match target {
        Some(req) => format!("{}\n", page_link(req, label, false)),
        None => format!("<span class=\"control disabled\">{label}</span>\n"),
    }
}

fn page_link(req: PageRequest, label: &str, active: bool) -> String {
    let class = if active { " class=\"active\"" } else { "" };
    format!(
        "<a href=\"{}\"{class}>{label}</a>",
        escape_html(&listing_url(req))
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
