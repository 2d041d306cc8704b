use shared::{domain::FormId, error::AddressError, protocol::FormAddress};
use url::Url;

/// Parses the share origin and makes sure its path ends in `/`, so joining a
/// form address appends to it instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(raw.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

pub fn share_link(base: &Url, form_id: FormId) -> Result<Url, url::ParseError> {
    base.join(&FormAddress::new(form_id).path())
}

/// Accepts a full share link or a bare `userform/<id>` path.
pub fn address_from_link(link: &str) -> Result<FormAddress, AddressError> {
    let path = match Url::parse(link.trim()) {
        Ok(url) => url.path().to_string(),
        Err(_) => link.trim().to_string(),
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., prefix, id] => FormAddress::parse(&format!("{prefix}/{id}")),
        _ => Err(AddressError::Malformed(link.to_string())),
    }
}
