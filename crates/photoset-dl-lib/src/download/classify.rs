/// Status codes that are reported as a redirect instead of being followed.
pub const REDIRECT_STATUS_CODES: [u16; 6] = [301, 302, 303, 305, 307, 308];

pub fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 305 | 307 | 308)
}

/// What completion handling does with a fully received response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseDisposition {
    Redirect,
    HttpError,
    Save,
}

pub fn response_disposition(status: u16) -> ResponseDisposition {
    if is_redirect(status) {
        ResponseDisposition::Redirect
    } else if (400..600).contains(&status) {
        ResponseDisposition::HttpError
    } else {
        ResponseDisposition::Save
    }
}
