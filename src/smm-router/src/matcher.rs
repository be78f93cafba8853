//! Path patterns.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Static(String),
    Param(String),
}

/// A full, absolute route pattern split into segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    pub(crate) fn parse(path: &str) -> Self {
        Self {
            segments: split(path)
                .map(|s| match s.strip_prefix(':') {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Static(s.to_string()),
                })
                .collect(),
        }
    }

    /// Pattern of a child route nested under `self`.
    pub(crate) fn join(&self, child: &str) -> Self {
        let mut joined = self.clone();
        joined.segments.extend(Self::parse(child).segments);
        joined
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a whole path, returning captured params in declaration order.
    pub(crate) fn matches(&self, path: &[&str]) -> Option<Vec<(String, String)>> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, raw) in self.segments.iter().zip(path) {
            match segment {
                // Static segments match case-insensitively; params keep their case.
                Segment::Static(expected) => {
                    if !decode(raw).eq_ignore_ascii_case(expected) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if raw.is_empty() {
                        return None;
                    }
                    params.push((name.clone(), decode(raw).into_owned()));
                }
            }
        }
        Some(params)
    }
}

/// Split a path into its non-empty segments, dropping query and fragment.
pub(crate) fn split(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

// Malformed escapes are kept verbatim.
fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
