use serde::Deserialize;

/// An image placed on the dome. Identity is the (normalized) source URI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
}

impl ImageDescriptor {
    pub fn new(src: impl AsRef<str>, alt: impl Into<String>) -> Self {
        Self {
            src: normalize_src(src.as_ref()),
            alt: alt.into(),
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.src.is_empty()
    }
}

/// Caller input: either a bare source string or `{ src, alt }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DomeImage {
    Bare(String),
    Described {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl From<&str> for DomeImage {
    fn from(src: &str) -> Self {
        DomeImage::Bare(src.to_string())
    }
}

impl From<(&str, &str)> for DomeImage {
    fn from((src, alt): (&str, &str)) -> Self {
        DomeImage::Described {
            src: Some(src.to_string()),
            alt: Some(alt.to_string()),
        }
    }
}

impl From<&DomeImage> for ImageDescriptor {
    fn from(image: &DomeImage) -> Self {
        match image {
            DomeImage::Bare(src) => ImageDescriptor::new(src, String::new()),
            DomeImage::Described { src, alt } => ImageDescriptor::new(
                src.as_deref().unwrap_or_default(),
                alt.clone().unwrap_or_default(),
            ),
        }
    }
}

/// Root relative image paths so tiles resolve the same way from any route.
///
/// `http(s)` URLs and rooted paths pass through, `./x` becomes `/x`,
/// `images/x` becomes `/images/x`, everything else is left alone.
pub fn normalize_src(src: &str) -> String {
    if src.is_empty() || src.starts_with("http") || src.starts_with('/') {
        return src.to_string();
    }
    if let Some(rest) = src.strip_prefix("./") {
        return format!("/{rest}");
    }
    if src.starts_with("images/") {
        return format!("/{src}");
    }
    src.to_string()
}
