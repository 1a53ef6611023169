//! SOAP envelope construction
//!
//! Every value that ends up inside the document goes through
//! [`escape_xml`] first. Registration numbers come straight from callers and
//! must never be able to open new elements or close the envelope.

use std::borrow::Cow;

/// Content type for SOAP 1.2 requests
pub const SOAP12_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Content type for SOAP 1.1 requests
pub const SOAP11_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Placeholder registration sent by the credentials check
pub const CHECK_REGISTRATION: &str = "TEST123";

/// Escape `&`, `<`, `>`, `"` and `'` for use in element text or attributes
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// SOAP 1.2 envelope for a registration lookup
pub fn soap12_lookup(
    operation: &str,
    namespace: &str,
    registration_number: &str,
    username: &str,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap12:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                 xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                 xmlns:soap12="http://www.w3.org/2003/05/soap-envelope">
  <soap12:Body>
    <{operation} xmlns="{namespace}">
      <RegistrationNumber>{registration}</RegistrationNumber>
      <username>{username}</username>
    </{operation}>
  </soap12:Body>
</soap12:Envelope>"#,
        operation = operation,
        namespace = escape_xml(namespace),
        registration = escape_xml(registration_number),
        username = escape_xml(username),
    )
}

/// SOAP 1.1 envelope for the credentials check
pub fn soap11_credentials_check(operation: &str, namespace: &str, username: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xmlns:xsd="http://www.w3.org/2001/XMLSchema"
               xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <{operation} xmlns="{namespace}">
      <RegistrationNumber>{registration}</RegistrationNumber>
      <username>{username}</username>
    </{operation}>
  </soap:Body>
</soap:Envelope>"#,
        operation = operation,
        namespace = escape_xml(namespace),
        registration = CHECK_REGISTRATION,
        username = escape_xml(username),
    )
}

/// `SOAPAction` header value: the SOAP 1.1 namespace followed by the operation
pub fn soap_action(namespace: &str, operation: &str) -> String {
    if namespace.ends_with('/') {
        format!("{}{}", namespace, operation)
    } else {
        format!("{}/{}", namespace, operation)
    }
}

/// True when `name` can be used verbatim as an element name
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{find_path, xml_to_json};

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
        assert!(matches!(escape_xml("KL03Y1954"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_soap12_lookup_structure() {
        let body = soap12_lookup("CheckIndia", "http://regcheck.org.uk", "KL03Y1954", "acct");
        assert!(body.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(body.contains(r#"xmlns:soap12="http://www.w3.org/2003/05/soap-envelope""#));
        assert!(body.contains(r#"<CheckIndia xmlns="http://regcheck.org.uk">"#));
        assert!(body.contains("<RegistrationNumber>KL03Y1954</RegistrationNumber>"));
        assert!(body.contains("<username>acct</username>"));

        let doc = xml_to_json(&body).unwrap();
        let op = find_path(&doc, &["Envelope", "Body", "CheckIndia"]).unwrap();
        assert_eq!(op["RegistrationNumber"], "KL03Y1954");
    }

    #[test]
    fn test_registration_cannot_inject_elements() {
        let hostile = "X</RegistrationNumber><username>attacker</username><RegistrationNumber>Y";
        let body = soap12_lookup("CheckIndia", "http://regcheck.org.uk", hostile, "acct");

        let doc = xml_to_json(&body).unwrap();
        let op = find_path(&doc, &["Envelope", "Body", "CheckIndia"]).unwrap();
        // Still exactly one username, and the registration round-trips as text
        assert_eq!(op["username"], "acct");
        assert_eq!(op["RegistrationNumber"], hostile);
    }

    #[test]
    fn test_soap11_credentials_check_structure() {
        let body = soap11_credentials_check("CheckIndia", "http://regcheck.org.uk/", "acct");
        assert!(body.contains(r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(body.contains(r#"<CheckIndia xmlns="http://regcheck.org.uk/">"#));
        assert!(body.contains("<RegistrationNumber>TEST123</RegistrationNumber>"));
    }

    #[test]
    fn test_soap_action() {
        assert_eq!(
            soap_action("http://regcheck.org.uk/", "CheckIndia"),
            "http://regcheck.org.uk/CheckIndia"
        );
        assert_eq!(
            soap_action("http://regcheck.org.uk", "CheckIndia"),
            "http://regcheck.org.uk/CheckIndia"
        );
    }

    #[test]
    fn test_element_names() {
        assert!(is_valid_element_name("CheckIndia"));
        assert!(is_valid_element_name("Check_UK2"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("1Check"));
        assert!(!is_valid_element_name("Check><x"));
    }
}
