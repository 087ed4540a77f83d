use std::collections::BTreeMap;

/// Container labels keyed by label name,
///
pub type LabelMap = BTreeMap<String, String>;

/// Converts `key=value` entries into a label map,
///
/// Entries are split on the first `=`, an entry w/o one becomes a key w/ an empty value.
/// Later entries overwrite earlier entries w/ the same key.
///
pub fn parse_labels<I, S>(entries: I) -> LabelMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (entry.to_string(), String::new()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_labels, LabelMap};

    fn labels(pairs: &[(&str, &str)]) -> LabelMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            labels(&[("io.cri-containerd.pinned", "pinned")]),
            parse_labels(["io.cri-containerd.pinned=pinned"])
        );

        assert_eq!(
            labels(&[("io.cri-containerd.pinned,pinned", "")]),
            parse_labels(["io.cri-containerd.pinned,pinned"])
        );

        assert_eq!(labels(&[("", "")]), parse_labels([""]));

        assert_eq!(
            labels(&[
                ("io.cri-containerd.pinned", "pinned"),
                ("io.cri-containerd.test,test", "")
            ]),
            parse_labels(["io.cri-containerd.pinned=pinned", "io.cri-containerd.test,test"])
        );

        assert_eq!(
            labels(&[
                ("io.cri-containerd.pinned", "pinned"),
                ("io.cri-containerd.test", "")
            ]),
            parse_labels(["io.cri-containerd.pinned=pinned", "io.cri-containerd.test="])
        );

        assert_eq!(labels(&[("k", "v"), ("k2,v2", "")]), parse_labels(["k=v", "k2,v2"]));
    }

    #[test]
    fn test_parse_labels_value_keeps_separators() {
        assert_eq!(
            labels(&[("selector", "a=b,c=d")]),
            parse_labels(vec!["selector=a=b,c=d".to_string()])
        );
    }

    #[test]
    fn test_parse_labels_last_write_wins() {
        assert_eq!(
            labels(&[("tier", "backend")]),
            parse_labels(["tier=frontend", "tier", "tier=backend"])
        );
        assert!(parse_labels(Vec::<String>::new()).is_empty());
    }
}
