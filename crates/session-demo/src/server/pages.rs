//! HTML for the home page.

/// An open session as shown on the home page.
pub struct SessionView<'a> {
    pub email: &'a str,
    pub token: &'a str,
}

/// Render the home page: session details and a logout button when signed
/// in, a login form otherwise.
pub fn home(session: Option<SessionView<'_>>) -> String {
    let body = match session {
        Some(s) => format!(
            r#"<p>Token: {token}</p>
		<p>You are signed in as {email}</p>
		<form action="logout" method="POST">
			<input type="submit" value="Logout"/>
		</form>"#,
            token = escape(s.token),
            email = escape(s.email),
        ),
        None => r#"<form action="login" method="POST">
			Email: <input type="email" name="email" />
			<input type="submit" value="Login"/>
		</form>"#
            .to_owned(),
    };
    format!(
        "<!DOCTYPE html>\n<html>\n\t<head></head>\n\t<body>\n\t\t{body}\n\t</body>\n</html>\n"
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
