use std::collections::BTreeMap;

use serde::Serialize;

/// Id of the implicit group every team belongs to.
pub const ALL_GROUP: &str = "all";

/// A named team group (e.g. official, girls).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    /// Display names keyed by locale.
    pub names: BTreeMap<String, String>,
    /// Set on the implicit catch-all group only.
    pub is_default: bool,
}

impl Group {
    pub fn all() -> Self {
        let mut names = BTreeMap::new();
        names.insert("en".to_string(), "All".to_string());
        names.insert("zh-CN".to_string(), "所有队伍".to_string());
        Self {
            id: ALL_GROUP.to_string(),
            names,
            is_default: true,
        }
    }

    pub fn name(&self, locale: &str) -> Option<&str> {
        self.names.get(locale).map(String::as_str)
    }
}

/// Build the group table of a contest. The declared label is the zh-CN name;
/// well-known ids also get an English name and `girls` folds into `girl`.
pub fn build_groups(declared: &BTreeMap<String, String>) -> BTreeMap<String, Group> {
    let mut groups = BTreeMap::new();
    groups.insert(ALL_GROUP.to_string(), Group::all());

    for (id, label) in declared {
        let mut key = id.as_str();
        let mut group = Group::default();
        group.names.insert("zh-CN".to_string(), label.clone());

        let english = match id.as_str() {
            "official" => Some("Official"),
            "unofficial" => Some("Unofficial"),
            "girl" | "girls" => {
                key = "girl";
                Some("Girls")
            }
            _ => None,
        };
        if let Some(en) = english {
            group.names.insert("en".to_string(), en.to_string());
        }

        group.id = key.to_string();
        groups.insert(group.id.clone(), group);
    }

    groups
}
