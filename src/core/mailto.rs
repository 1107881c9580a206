use crate::domain::model::ContactSubmission;

pub fn inquiry_subject(submission: &ContactSubmission) -> String {
    format!("Website inquiry from {}", submission.name)
}

pub fn inquiry_body(submission: &ContactSubmission) -> String {
    format!(
        "{}\n\n— {} ({})",
        submission.message, submission.name, submission.email
    )
}

/// `mailto:` link with the subject and body percent-encoded.
///
/// `urlencoding` leaves only `A-Z a-z 0-9 - _ . ~` unescaped, so spaces
/// become `%20` rather than `+`, which mail clients would show literally.
pub fn compose_mailto(recipient: &str, submission: &ContactSubmission) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&inquiry_subject(submission)),
        urlencoding::encode(&inquiry_body(submission)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_mailto() {
        let submission = ContactSubmission::parse("Alice", "a@x.com", "Hi").unwrap();
        let link = compose_mailto("me@site.dev", &submission);

        assert_eq!(
            link,
            "mailto:me@site.dev?subject=Website%20inquiry%20from%20Alice\
             &body=Hi%0A%0A%E2%80%94%20Alice%20%28a%40x.com%29"
        );
    }

    #[test]
    fn test_compose_mailto_escapes_query_delimiters() {
        let submission =
            ContactSubmission::parse("Bob & Co", "b@x.com", "a=b?c#d").unwrap();
        let link = compose_mailto("me@site.dev", &submission);

        let query = link.split_once('?').unwrap().1;
        assert_eq!(query.matches('&').count(), 1);
        assert!(!query.contains('#'));
        assert!(query.contains("Bob%20%26%20Co"));
        assert!(query.contains("a%3Db%3Fc%23d"));
    }

    #[test]
    fn test_body_layout() {
        let submission = ContactSubmission::parse("Alice", "a@x.com", "Hi").unwrap();
        assert_eq!(inquiry_subject(&submission), "Website inquiry from Alice");
        assert_eq!(inquiry_body(&submission), "Hi\n\n— Alice (a@x.com)");
    }
}
