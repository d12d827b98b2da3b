//! Composition of mappings.
//!
//! A chain threads every symbol through its stages in order. Symbols that a
//! stage does not rename fall through unchanged, which is what lets sparse
//! tables from different schemes be combined.

use crate::immutable::ImmutableMapping;
use crate::mapping::{Mapping, Pairs};
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol};
use once_cell::unsync::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

/// An ordered composition of mappings.
///
/// The composed relations are computed on first enumeration and cached; the
/// stages themselves are never modified.
///
/// Grouping only matters for ambiguous inputs. When a symbol is both the
/// image of an earlier stage and an untouched key of its own, a flat chain
/// renames it once while a nested chain may also keep it as a separate key:
/// with `a -> b`, `b -> c` and a third stage `b -> x`, the flat chain holds
/// `{a -> c}` but `compose(&compose(m1, m2), m3)` holds `{a -> c, b -> x}`,
/// since the materialized inner table no longer knows that `b` is renamed.
pub struct ChainedMapping<'a> {
    stages: Vec<&'a dyn Mapping>,
    composed: OnceCell<ImmutableMapping>,
}

impl<'a> ChainedMapping<'a> {
    pub fn new(stages: impl IntoIterator<Item = &'a dyn Mapping>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
            composed: OnceCell::new(),
        }
    }

    pub fn pair(first: &'a dyn Mapping, second: &'a dyn Mapping) -> Self {
        Self::new(vec![first, second])
    }

    /// Append another stage to the end of the chain.
    pub fn then(mut self, next: &'a dyn Mapping) -> Self {
        self.stages.push(next);
        self.composed = OnceCell::new();
        self
    }

    pub fn stages(&self) -> &[&'a dyn Mapping] {
        &self.stages
    }

    /// The materialized composition.
    pub fn composed(&self) -> &ImmutableMapping {
        self.composed.get_or_init(|| compose_stages(&self.stages))
    }
}

impl Mapping for ChainedMapping<'_> {
    fn classes(&self) -> Pairs<'_, ClassSymbol> {
        self.composed().classes()
    }

    fn fields(&self) -> Pairs<'_, FieldSymbol> {
        self.composed().fields()
    }

    fn methods(&self) -> Pairs<'_, MethodSymbol> {
        self.composed().methods()
    }

    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol> {
        self.composed().get_class(original)
    }

    fn get_field(&self, original: &FieldSymbol) -> Option<FieldSymbol> {
        self.composed().get_field(original)
    }

    fn get_method(&self, original: &MethodSymbol) -> Option<MethodSymbol> {
        self.composed().get_method(original)
    }

    fn map_class(&self, original: &ClassSymbol) -> ClassSymbol {
        through_class(&self.stages, original)
    }

    fn map_field(&self, original: &FieldSymbol) -> FieldSymbol {
        through_field(&self.stages, original)
    }

    fn map_method(&self, original: &MethodSymbol) -> MethodSymbol {
        through_method(&self.stages, original)
    }
}

/// Compose two mappings into a materialized table.
pub fn compose(first: &dyn Mapping, second: &dyn Mapping) -> ImmutableMapping {
    compose_stages(&[first, second])
}

// ============================================================================
// Threading symbols through stages
// ============================================================================

fn through_class(stages: &[&dyn Mapping], original: &ClassSymbol) -> ClassSymbol {
    stages
        .iter()
        .fold(original.clone(), |current, stage| stage.map_class(&current))
}

/// The owner and descriptor always follow the chain's own class rename, since
/// a later stage may move the owner without listing the member.
fn through_field(stages: &[&dyn Mapping], original: &FieldSymbol) -> FieldSymbol {
    let renamed = stages
        .iter()
        .fold(original.clone(), |current, stage| stage.map_field(&current));
    let owners = original.map_classes(|c| through_class(stages, c));
    FieldSymbol {
        owner: owners.owner,
        name: renamed.name,
        descriptor: owners.descriptor,
    }
}

fn through_method(stages: &[&dyn Mapping], original: &MethodSymbol) -> MethodSymbol {
    let renamed = stages
        .iter()
        .fold(original.clone(), |current, stage| stage.map_method(&current));
    let owners = original.map_classes(|c| through_class(stages, c));
    MethodSymbol {
        owner: owners.owner,
        name: renamed.name,
        descriptor: owners.descriptor,
    }
}

// ============================================================================
// Materialization
// ============================================================================

fn compose_stages(stages: &[&dyn Mapping]) -> ImmutableMapping {
    let first = match stages.first() {
        Some(first) => *first,
        None => return ImmutableMapping::empty(),
    };

    let mut composed = materialize(
        &stages[..1],
        first.classes().map(|(original, _)| original),
        first.fields().map(|(original, _)| original),
        first.methods().map(|(original, _)| original),
    );

    for depth in 1..stages.len() {
        let prefix = &stages[..depth];
        let next = stages[depth];

        let class_index = inverse_index(&composed.classes);
        let field_index = inverse_index(&composed.fields);
        let method_index = inverse_index(&composed.methods);
        let class_preimage =
            |c: &ClassSymbol| class_index.get(c).cloned().unwrap_or_else(|| c.clone());

        let classes: Vec<ClassSymbol> = composed
            .classes
            .keys()
            .cloned()
            .chain(next.classes().filter_map(|(key, _)| {
                preimage(&key, &class_index, class_preimage, |c| through_class(prefix, c))
            }))
            .collect();
        let fields: Vec<FieldSymbol> = composed
            .fields
            .keys()
            .cloned()
            .chain(next.fields().filter_map(|(key, _)| {
                preimage(
                    &key,
                    &field_index,
                    |f| f.map_classes(class_preimage),
                    |f| through_field(prefix, f),
                )
            }))
            .collect();
        let methods: Vec<MethodSymbol> = composed
            .methods
            .keys()
            .cloned()
            .chain(next.methods().filter_map(|(key, _)| {
                preimage(
                    &key,
                    &method_index,
                    |m| m.map_classes(class_preimage),
                    |m| through_method(prefix, m),
                )
            }))
            .collect();

        composed = materialize(&stages[..=depth], classes, fields, methods);
    }

    tracing::debug!(
        stages = stages.len(),
        classes = composed.class_count(),
        fields = composed.field_count(),
        methods = composed.method_count(),
        "composed mapping"
    );
    composed
}

fn materialize(
    stages: &[&dyn Mapping],
    classes: impl IntoIterator<Item = ClassSymbol>,
    fields: impl IntoIterator<Item = FieldSymbol>,
    methods: impl IntoIterator<Item = MethodSymbol>,
) -> ImmutableMapping {
    let classes: BTreeSet<_> = classes.into_iter().collect();
    let fields: BTreeSet<_> = fields.into_iter().collect();
    let methods: BTreeSet<_> = methods.into_iter().collect();
    ImmutableMapping::new(
        classes.into_iter().map(|c| {
            let renamed = through_class(stages, &c);
            (c, renamed)
        }),
        fields.into_iter().map(|f| {
            let renamed = through_field(stages, &f);
            (f, renamed)
        }),
        methods.into_iter().map(|m| {
            let renamed = through_method(stages, &m);
            (m, renamed)
        }),
    )
}

fn inverse_index<T: Ord + Clone>(relation: &BTreeMap<T, T>) -> BTreeMap<T, T> {
    relation
        .iter()
        .map(|(original, renamed)| (renamed.clone(), original.clone()))
        .collect()
}

/// The original whose image under the prefix is `key`, if one exists.
///
/// Explicit entries are tried first; otherwise `key` is mapped back class by
/// class. Candidates that do not land on `key` going forward are unreachable.
fn preimage<T: Ord + Clone>(
    key: &T,
    index: &BTreeMap<T, T>,
    fallback: impl Fn(&T) -> T,
    forward: impl Fn(&T) -> T,
) -> Option<T> {
    let candidate = index.get(key).cloned().unwrap_or_else(|| fallback(key));
    if forward(&candidate) == *key {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackageMapping;

    fn class(name: &str) -> ClassSymbol {
        ClassSymbol::new(name)
    }

    fn field(owner: &str, name: &str) -> FieldSymbol {
        FieldSymbol::new(class(owner), name)
    }

    fn method(owner: &str, name: &str, desc: &str) -> MethodSymbol {
        MethodSymbol::new(class(owner), name, desc.parse().unwrap())
    }

    #[test]
    fn grouping_differs_only_for_ambiguous_keys() {
        let m1 = ImmutableMapping::new(vec![(class("a"), class("b"))], vec![], vec![]);
        let m2 = ImmutableMapping::new(vec![(class("b"), class("c"))], vec![], vec![]);
        let m3 = ImmutableMapping::new(vec![(class("b"), class("x"))], vec![], vec![]);

        let flat = ChainedMapping::new(vec![&m1 as &dyn Mapping, &m2, &m3]);
        let nested = compose(&compose(&m1, &m2), &m3);

        assert_eq!(
            flat.composed(),
            &ImmutableMapping::new(vec![(class("a"), class("c"))], vec![], vec![])
        );
        assert_eq!(
            nested,
            ImmutableMapping::new(
                vec![(class("a"), class("c")), (class("b"), class("x"))],
                vec![],
                vec![]
            )
        );
    }

    #[test]
    fn missing_entry_falls_through() {
        let first = ImmutableMapping::new(vec![(class("a"), class("B"))], vec![], vec![]);
        let second = ImmutableMapping::new(vec![(class("x"), class("Y"))], vec![], vec![]);
        let composed = compose(&first, &second);
        assert_eq!(composed.get_class(&class("a")), Some(class("B")));
        assert_eq!(composed.get_class(&class("x")), Some(class("Y")));
    }

    #[test]
    fn later_stage_renames_owner() {
        let first = ImmutableMapping::new(
            vec![],
            vec![(field("a", "b"), field("a", "count"))],
            vec![],
        );
        let second = ImmutableMapping::new(vec![(class("a"), class("World"))], vec![], vec![]);
        let composed = compose(&first, &second);
        assert_eq!(
            composed.get_field(&field("a", "b")),
            Some(field("World", "count"))
        );
    }

    #[test]
    fn members_keyed_by_renamed_owner_are_reached() {
        // Class table first, then a member table keyed by the renamed owner.
        let classes = ImmutableMapping::new(vec![(class("a"), class("World"))], vec![], vec![]);
        let members = ImmutableMapping::new(
            vec![],
            vec![(field("World", "b"), field("World", "time"))],
            vec![(
                method("World", "c", "(La;)V"),
                method("World", "tick", "(La;)V"),
            )],
        );
        let chained = ChainedMapping::pair(&classes, &members);
        assert_eq!(
            chained.get_field(&field("a", "b")),
            Some(field("World", "time"))
        );
        // The member table's descriptor uses the original name `a`, which the
        // class stage never produces, so `c` is unreachable from `a`.
        assert_eq!(chained.methods().count(), 0);

        let members = ImmutableMapping::new(
            vec![],
            vec![],
            vec![(
                method("World", "c", "(LWorld;)V"),
                method("World", "tick", "(LWorld;)V"),
            )],
        );
        let chained = ChainedMapping::pair(&classes, &members);
        assert_eq!(
            chained.get_method(&method("a", "c", "(La;)V")),
            Some(method("World", "tick", "(LWorld;)V"))
        );
    }

    #[test]
    fn unreachable_keys_are_dropped() {
        // `a` is renamed away by the first stage, so nothing reaches `a` in the second.
        let first = ImmutableMapping::new(vec![(class("a"), class("B"))], vec![], vec![]);
        let second = ImmutableMapping::new(vec![(class("a"), class("Z"))], vec![], vec![]);
        let composed = compose(&first, &second);
        assert_eq!(composed.class_count(), 1);
        assert_eq!(composed.get_class(&class("a")), Some(class("B")));
    }

    #[test]
    fn package_stage_applies_to_every_class() {
        let classes = ImmutableMapping::new(vec![(class("a"), class("World"))], vec![], vec![]);
        let packages = PackageMapping::new(vec![("", "net/minecraft/server")]).unwrap();
        let chained = ChainedMapping::pair(&classes, &packages);
        assert_eq!(
            chained.get_class(&class("a")),
            Some(class("net/minecraft/server/World"))
        );
        assert_eq!(
            chained.map_class(&class("b")),
            class("net/minecraft/server/b")
        );
    }

    #[test]
    fn then_extends_the_chain() {
        let first = ImmutableMapping::new(vec![(class("a"), class("b"))], vec![], vec![]);
        let second = ImmutableMapping::new(vec![(class("b"), class("c"))], vec![], vec![]);
        let third = ImmutableMapping::new(vec![(class("c"), class("d"))], vec![], vec![]);
        let chained = ChainedMapping::pair(&first, &second);
        assert_eq!(chained.get_class(&class("a")), Some(class("c")));
        let chained = chained.then(&third);
        assert_eq!(chained.stages().len(), 3);
        assert_eq!(chained.get_class(&class("a")), Some(class("d")));
    }

    #[test]
    fn empty_and_single_stage() {
        let chained = ChainedMapping::new(Vec::<&dyn Mapping>::new());
        assert_eq!(chained.classes().count(), 0);

        let only = ImmutableMapping::new(vec![(class("a"), class("b"))], vec![], vec![]);
        let chained = ChainedMapping::new(vec![&only as &dyn Mapping]);
        assert_eq!(chained.composed(), &only);
    }
}
