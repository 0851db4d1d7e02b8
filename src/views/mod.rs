//! Server-rendered pages as plain functions. Handlers wrap the returned
//! strings in `axum::response::Html`.

use axum::http::StatusCode;

use crate::calendar::MonthView;
use crate::models::event::FORM_DATETIME_FORMAT;
use crate::models::Event;

const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; vertical-align: top; }}\n\
         td.pad {{ background: #f5f5f5; }}\n\
         nav a {{ margin-right: 1rem; }}\n\
         form label {{ display: block; margin-top: 0.8rem; }}\n\
         .event {{ font-size: 0.85em; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Events</a><a href=\"/calendar\">Calendar</a><a href=\"/add\">Add event</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

pub fn index_page(events: &[Event]) -> String {
    let mut rows = String::new();
    for event in events {
        rows.push_str(&format!(
            "<tr><td>{title}</td><td>{description}</td><td>{date}</td>\
             <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>\n",
            title = escape(&event.title),
            description = escape(&event.description),
            date = event.event_date.format(DISPLAY_DATETIME_FORMAT),
            id = event.id,
        ));
    }

    let body = if events.is_empty() {
        "<h1>Events</h1>\n<p>No events yet. <a href=\"/add\">Add one</a>.</p>".to_string()
    } else {
        format!(
            "<h1>Events</h1>\n<table>\n\
             <tr><th>Title</th><th>Description</th><th>Date</th><th></th></tr>\n\
             {rows}</table>"
        )
    };

    layout("Events", &body)
}

/// Blank form when `event` is None, pre-filled edit form otherwise.
pub fn event_form_page(event: Option<&Event>) -> String {
    let (heading, action, title, description, date) = match event {
        Some(event) => (
            "Edit event",
            format!("/edit/{}", event.id),
            escape(&event.title),
            escape(&event.description),
            event.event_date.format(FORM_DATETIME_FORMAT).to_string(),
        ),
        None => (
            "Add event",
            "/add".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ),
    };

    let body = format!(
        "<h1>{heading}</h1>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\" required></label>\n\
         <label>Description <textarea name=\"description\" maxlength=\"255\" required>{description}</textarea></label>\n\
         <label>Date <input type=\"datetime-local\" name=\"event_date\" value=\"{date}\" required></label>\n\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n\
         </form>"
    );

    layout(heading, &body)
}

pub fn calendar_page(view: &MonthView) -> String {
    let (prev_year, prev_month) = if view.month == 1 {
        (view.year - 1, 12)
    } else {
        (view.year, view.month - 1)
    };
    let (next_year, next_month) = if view.month == 12 {
        (view.year + 1, 1)
    } else {
        (view.year, view.month + 1)
    };

    let mut rows = String::new();
    for week in view.month_grid.chunks(7) {
        rows.push_str("<tr>");
        for &(day, _weekday) in week {
            if day == 0 {
                rows.push_str("<td class=\"pad\"></td>");
                continue;
            }
            let mut cell = format!("<strong>{day}</strong>");
            if let Some(bucket) = view.events_by_day.get(&day) {
                for event in bucket {
                    cell.push_str(&format!(
                        "<div class=\"event\"><a href=\"/edit/{id}\">{time} {title}</a></div>",
                        id = event.id,
                        time = event.event_date.format("%H:%M"),
                        title = escape(&event.title),
                    ));
                }
            }
            rows.push_str(&format!("<td>{cell}</td>"));
        }
        rows.push_str("</tr>\n");
    }

    let heading = format!("{} {}", view.month_name, view.year);
    let body = format!(
        "<h1>{heading}</h1>\n\
         <p>\
         <a href=\"/calendar?year={prev_year}&amp;month={prev_month}\">&laquo; previous</a> \
         <a href=\"/calendar?year={next_year}&amp;month={next_month}\">next &raquo;</a>\
         </p>\n\
         <table>\n\
         <tr><th>Mon</th><th>Tue</th><th>Wed</th><th>Thu</th><th>Fri</th><th>Sat</th><th>Sun</th></tr>\n\
         {rows}</table>"
    );

    layout(&heading, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "<h1>{heading}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to events</a></p>",
        message = escape(message),
    );
    layout(&heading, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::month_view;
    use chrono::NaiveDate;

    fn event(id: i64, title: &str) -> Event {
        let event_date = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Event {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            event_date,
            created_at: event_date,
        }
    }

    #[test]
    fn markup_is_escaped() {
        let page = index_page(&[event(1, "<script>alert(1)</script>")]);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let e = event(7, "Standup");
        let page = event_form_page(Some(&e));
        assert!(page.contains("action=\"/edit/7\""));
        assert!(page.contains("value=\"Standup\""));
        assert!(page.contains("value=\"2024-03-05T09:00\""));
    }

    #[test]
    fn calendar_page_shows_month_and_events() {
        let view = month_view(2024, 3, vec![event(1, "Standup")]).unwrap();
        let page = calendar_page(&view);
        assert!(page.contains("March 2024"));
        assert!(page.contains("09:00 Standup"));
        assert!(page.contains("month=2"));
        assert!(page.contains("month=4"));
    }
}
