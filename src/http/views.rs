//! Server-rendered pages. Markup is deliberately minimal; the pages exist to
//! carry the CRUD and auth flows, not to be a frontend.

use axum::response::Html;

use crate::db::models::Quote;

const DOCUMENT_TITLE: &str = "Adaquote!";

/// Escape text for interpolation into HTML.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn page(body: String) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        DOCUMENT_TITLE, body
    ))
}

pub fn quotes_index(quotes: &[Quote]) -> Html<String> {
    let mut items = String::new();
    for quote in quotes {
        items.push_str(&format!(
            "<li><a href=\"/quotes/{}\">{}</a> &mdash; {}</li>\n",
            escape(&quote.id),
            escape(&quote.content),
            escape(&quote.author),
        ));
    }

    page(format!(
        "<h1>Quotes</h1>\n<ul>\n{}</ul>\n<p><a href=\"/quotes/add\">Add a quote</a></p>",
        items
    ))
}

pub fn quote_single(quote: &Quote) -> Html<String> {
    page(format!(
        "<h1>Quote</h1>\n<blockquote>{}</blockquote>\n<p>{}</p>\n\
         <p><a href=\"/quotes/edit/{}\">Edit</a> | <a href=\"/quotes\">Back</a></p>",
        escape(&quote.content),
        escape(&quote.author),
        escape(&quote.id),
    ))
}

fn quote_form(action: &str, content: &str, author: &str, genre_id: i64) -> Html<String> {
    page(format!(
        "<h1>Quote</h1>\n<form action=\"{}\" method=\"post\">\n\
         <label>Content <input name=\"content\" value=\"{}\"></label>\n\
         <label>Author <input name=\"author\" value=\"{}\"></label>\n\
         <label>Genre <input name=\"genre_id\" value=\"{}\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>",
        escape(action),
        escape(content),
        escape(author),
        genre_id,
    ))
}

pub fn quotes_add(genre_id_default: i64) -> Html<String> {
    quote_form("/quotes", "", "", genre_id_default)
}

pub fn quotes_edit(quote: &Quote) -> Html<String> {
    quote_form(
        &format!("/quotes/{}", quote.id),
        &quote.content,
        &quote.author,
        quote.genre_id,
    )
}

pub fn login(failed: bool) -> Html<String> {
    let notice = if failed {
        "<p>Login failed. Check your username and password.</p>\n"
    } else {
        ""
    };

    page(format!(
        "<h1>Log in</h1>\n{}<form action=\"/auth/login\" method=\"post\">\n\
         <label>Username <input name=\"username\"></label>\n\
         <label>Password <input name=\"password\" type=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n</form>\n\
         <p><a href=\"/auth/register\">Register</a></p>",
        notice
    ))
}

pub fn register() -> Html<String> {
    page(
        "<h1>Register</h1>\n<form action=\"/auth/register\" method=\"post\">\n\
         <label>Username <input name=\"username\"></label>\n\
         <label>First name <input name=\"first_name\"></label>\n\
         <label>Last name <input name=\"last_name\"></label>\n\
         <label>Email <input name=\"email\" type=\"email\"></label>\n\
         <label>Password <input name=\"password\" type=\"password\"></label>\n\
         <button type=\"submit\">Register</button>\n</form>"
            .to_string(),
    )
}

pub fn home() -> Html<String> {
    page(
        "<h1>Adaquote!</h1>\n<p><a href=\"/quotes\">Browse quotes</a> | \
         <a href=\"/auth/login\">Log in</a></p>"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>\"&'</script>"),
            "&lt;script&gt;&quot;&amp;&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_index_escapes_content() {
        let quotes = vec![Quote {
            id: "q1".to_string(),
            content: "<b>bold</b>".to_string(),
            author: "Ada".to_string(),
            genre_id: 1,
            created_at: 0,
        }];
        let Html(rendered) = quotes_index(&quotes);
        assert!(rendered.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!rendered.contains("<b>bold</b>"));
    }
}
