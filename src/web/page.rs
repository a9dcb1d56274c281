use std::fmt::Write;
use std::string::String;

use super::http::Status;
use crate::Banner;

/// What the form page shows: the submitted text, the selected banner and
/// the rendered rows, if any.
#[derive(Debug, Default)]
pub struct FormPage<'a> {
    pub text: &'a str,
    pub banner: Banner,
    pub rows: &'a [String],
}

impl FormPage<'_> {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        head(&mut out, "ASCII Art Web");
        out.push_str("<h1>ASCII Art Web</h1>\n<form method=\"post\" action=\"/\">\n");
        let _ = writeln!(
            out,
            "<textarea name=\"userText\" rows=\"6\" cols=\"60\" required>{}</textarea>",
            escape(self.text)
        );
        out.push_str("<select name=\"bannerType\">\n");
        for banner in Banner::ALL {
            let selected = if banner == self.banner { " selected" } else { "" };
            let _ = writeln!(out, "<option value=\"{0}\"{1}>{0}</option>", banner, selected);
        }
        out.push_str("</select>\n<button type=\"submit\">Generate</button>\n</form>\n");
        if !self.rows.is_empty() {
            out.push_str("<pre class=\"art\">");
            for row in self.rows {
                out.push_str(&escape(row));
                out.push('\n');
            }
            out.push_str("</pre>\n");
        }
        tail(&mut out);
        out
    }
}

/// Error page for `status`.
pub fn error(status: Status) -> String {
    let mut out = String::new();
    head(&mut out, status.reason());
    let _ = write!(
        out,
        "<h1>{}</h1>\n<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to the form</a></p>\n",
        status.code(),
        status.reason(),
        description(status)
    );
    tail(&mut out);
    out
}

pub fn description(status: Status) -> &'static str {
    match status {
        Status::BadRequest => "Sorry, the request is invalid or incomplete.",
        Status::NotFound => {
            "Sorry, the page you are looking for might be missing or the URL is incorrect."
        }
        Status::InternalServerError => {
            "Sorry, something went wrong on our end. We are working to fix the issue."
        }
        _ => "An unexpected error occurred.",
    }
}

fn head(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/style/style.css\">\n\
         </head>\n<body>\n",
        escape(title)
    );
}

fn tail(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn escaping() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("|_|"), "|_|");
    }

    #[test]
    fn empty_form() {
        let html = FormPage::default().to_html();
        assert!(html.contains("<option value=\"Standard\" selected>Standard</option>"));
        assert!(html.contains("<option value=\"Shadow\">Shadow</option>"));
        assert!(!html.contains("<pre"));
    }

    #[test]
    fn rendered_form() {
        let rows = vec![" _ ".to_string(), "<_>".to_string()];
        let html = FormPage {
            text: "<b>",
            banner: Banner::Thinkertoy,
            rows: &rows,
        }
        .to_html();
        assert!(html.contains(">&lt;b&gt;</textarea>"));
        assert!(html.contains("<option value=\"Thinkertoy\" selected>"));
        assert!(html.contains("<pre class=\"art\"> _ \n&lt;_&gt;\n</pre>"));
    }

    #[test]
    fn error_pages() {
        let html = error(Status::NotFound);
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains("Not Found"));
        assert!(html.contains(description(Status::NotFound)));
        assert_eq!(description(Status::PayloadTooLarge), "An unexpected error occurred.");
    }
}
