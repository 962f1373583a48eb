use std::sync::{Arc, RwLock};

use tracing::info;

use crate::dictionary::ItemDictionary;
use crate::error::{AssocError, Result};
use crate::query::FrequentItem;
use crate::rules::encode::{encode_all, RawRule};
use crate::store::RuleStore;

/// One loaded, self-consistent (rule store, dictionary) pair, identified by
/// an opaque model identifier. Immutable once built; reloading produces a new
/// `Model` rather than touching this one.
#[derive(Debug)]
pub struct Model {
    id: String,
    store: RuleStore,
}

impl Model {
    pub fn new(id: impl Into<String>, store: RuleStore) -> Self {
        Self {
            id: id.into(),
            store,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }
}

/// The single active model shared by all queries.
///
/// Loading swaps an `Arc` snapshot under a brief write lock, so a query
/// either sees the previous (store, dictionary) pair in full or the new one
/// in full, never a mixture. In-flight queries keep the snapshot they
/// resolved and are unaffected by a concurrent reload.
#[derive(Debug, Default)]
pub struct ActiveModel {
    current: RwLock<Option<Arc<Model>>>,
}

impl ActiveModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replaces the active model.
    pub fn load(&self, id: impl Into<String>, store: RuleStore) -> Arc<Model> {
        let model = Arc::new(Model::new(id, store));
        info!(
            model = model.id(),
            rules = model.store().len(),
            items = model.store().dictionary().len(),
            "model loaded"
        );
        *self.current.write().unwrap() = Some(Arc::clone(&model));
        model
    }

    /// Encodes `raws` and loads the result as the active model. With a
    /// catalogue the dictionary is built from it up front and every rule item
    /// must be covered by it; without one the dictionary is discovered
    /// incrementally from the rules themselves.
    pub fn load_rules(
        &self,
        id: impl Into<String>,
        raws: &[RawRule],
        catalogue: Option<Vec<String>>,
    ) -> Result<Arc<Model>> {
        let (mut dictionary, insert_unknown) = match catalogue {
            Some(items) => (ItemDictionary::from_catalogue(items), false),
            None => (ItemDictionary::new(), true),
        };
        let rules = encode_all(raws, &mut dictionary, insert_unknown)?;
        Ok(self.load(id, RuleStore::new(rules, dictionary)))
    }

    /// The current snapshot, or `NoActiveModel` before the first load.
    pub fn current(&self) -> Result<Arc<Model>> {
        self.current
            .read()
            .unwrap()
            .clone()
            .ok_or(AssocError::NoActiveModel)
    }

    /// Whether the requested model is already the active one, so a caller can
    /// skip reloading it.
    pub fn is_loaded(&self, id: &str) -> bool {
        self.current
            .read()
            .unwrap()
            .as_ref()
            .map(|model| model.id() == id)
            .unwrap_or(false)
    }

    pub fn frequent_items<S: AsRef<str>>(&self, present: &[S]) -> Result<Vec<FrequentItem>> {
        self.current()?.store().frequent_items(present)
    }

    pub fn related_rules<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<String>> {
        self.current()?.store().related_rules(targets)
    }

    pub fn analyse(&self) -> Result<Vec<u32>> {
        self.current()?.store().analyse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! str_vec {
        ($($x:expr),*) => {
            {
                let mut vec: Vec<String> = vec![];
                $(vec.push($x.into());)*
                vec
            }
        };
    }

    fn raws() -> Vec<RawRule> {
        vec![
            RawRule::from_row("a", "b", 10, 10, 10),
            RawRule::from_row("b", "c", 5, 5, 5),
        ]
    }

    #[test]
    fn queries_before_any_load_are_rejected() {
        let active = ActiveModel::new();
        assert_eq!(
            active.frequent_items(&["a"]),
            Err(AssocError::NoActiveModel)
        );
        assert_eq!(active.analyse(), Err(AssocError::NoActiveModel));
    }

    #[test]
    fn load_rules_without_a_catalogue_discovers_the_dictionary() {
        let active = ActiveModel::new();
        let model = active.load_rules("m1", &raws(), None).unwrap();

        assert_eq!(model.store().len(), 2);
        assert_eq!(model.store().dictionary().len(), 3);
        assert!(active.is_loaded("m1"));
        assert!(!active.is_loaded("m2"));
    }

    #[test]
    fn load_rules_against_a_catalogue_is_strict() {
        let active = ActiveModel::new();
        let err = active
            .load_rules("m1", &raws(), Some(str_vec!["a", "b"]))
            .unwrap_err();

        assert_eq!(err, AssocError::UnknownItem("c".into()));
        // the failed load must not have replaced anything
        assert_eq!(active.current().unwrap_err(), AssocError::NoActiveModel);
    }

    #[test]
    fn catalogue_order_fixes_the_codes() {
        let active = ActiveModel::new();
        let model = active
            .load_rules("m1", &raws(), Some(str_vec!["c", "b", "a"]))
            .unwrap();

        let dictionary = model.store().dictionary();
        assert_eq!(dictionary.code_for_existing("c").unwrap(), 0);
        assert_eq!(dictionary.code_for_existing("a").unwrap(), 2);
    }

    #[test]
    fn reload_swaps_the_whole_snapshot() {
        let active = ActiveModel::new();
        active.load_rules("m1", &raws(), None).unwrap();
        let before = active.current().unwrap();

        active
            .load_rules("m2", &[RawRule::from_row("x", "y", 1, 1, 1)], None)
            .unwrap();
        let after = active.current().unwrap();

        assert_eq!(after.id(), "m2");
        assert_eq!(after.store().dictionary().len(), 2);
        // the old snapshot is untouched and still answers against its own pair
        assert_eq!(before.id(), "m1");
        assert_eq!(
            before.store().frequent_items(&["a"]).unwrap()[0].item,
            "b"
        );
        // the new dictionary has never heard of the old items
        assert_eq!(
            after.store().frequent_items(&["a"]),
            Err(AssocError::UnknownItem("a".into()))
        );
    }

    #[test]
    fn queries_go_through_the_active_snapshot() {
        let active = ActiveModel::new();
        active.load_rules("m1", &raws(), None).unwrap();

        let frequent = active.frequent_items(&["a"]).unwrap();
        assert_eq!(frequent[0].item, "b");

        let related = active.related_rules(&["b"]).unwrap();
        assert_eq!(related.len(), 2);

        let histogram = active.analyse().unwrap();
        assert_eq!(histogram[1], 2);
    }
}
