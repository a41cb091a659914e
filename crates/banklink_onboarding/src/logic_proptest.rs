#[cfg(test)]
mod tests {
    use crate::logic::{client_user_id, sanitize_email};
    use proptest::prelude::*;
    use proptest::sample::Index;

    // Same filtering rule written out independently of the implementation
    fn ascii_alphanumerics(email: &str) -> String {
        let mut kept = String::new();
        for c in email.chars() {
            if c.is_ascii_alphanumeric() {
                kept.push(c);
            }
        }
        kept
    }

    proptest! {
        // The Plaid user id is always `<customerId>-<filtered email>`
        #[test]
        fn test_client_user_id_is_customer_dash_filtered_email(
            customer_id in "cus_[A-Za-z0-9]{1,24}",
            email in "\\PC{0,40}",
        ) {
            let expected = format!("{}-{}", customer_id, ascii_alphanumerics(&email));
            prop_assert_eq!(client_user_id(&customer_id, &email), expected);
        }

        // Whatever the input, the suffix only holds [A-Za-z0-9]
        #[test]
        fn test_email_suffix_is_ascii_alphanumeric(email in "\\PC{0,60}") {
            let suffix = sanitize_email(&email);
            prop_assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
            prop_assert!(suffix.len() <= email.len());
        }

        // Punctuation inserted anywhere does not change the suffix
        #[test]
        fn test_punctuation_does_not_change_suffix(
            email in "[a-zA-Z0-9@.]{0,30}",
            punctuation in "[.+_@!#%-]{1,5}",
            position in any::<Index>(),
        ) {
            let at = position.index(email.len() + 1);
            let mut noisy = email.clone();
            noisy.insert_str(at, &punctuation);

            prop_assert_eq!(sanitize_email(&noisy), sanitize_email(&email));
            prop_assert_eq!(
                client_user_id("cus_1", &noisy),
                client_user_id("cus_1", &email)
            );
        }
    }
}
