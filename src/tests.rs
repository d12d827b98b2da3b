use crate::{
    compose, serialize_sorted, strip_duplicates, ChainedMapping, ClassSymbol, FieldSymbol,
    ImmutableMapping, Mapping, MethodSymbol, Pairs, Renamer, RenamingMapping,
};

fn class(name: &str) -> ClassSymbol {
    ClassSymbol::new(name)
}

fn field(owner: &str, name: &str) -> FieldSymbol {
    FieldSymbol::new(class(owner), name)
}

fn method(owner: &str, name: &str, desc: &str) -> MethodSymbol {
    MethodSymbol::new(class(owner), name, desc.parse().unwrap())
}

/// obf -> srg style table.
fn obf_to_srg() -> ImmutableMapping {
    ImmutableMapping::new(
        vec![
            (class("a"), class("net/minecraft/World")),
            (class("b"), class("net/minecraft/Entity")),
        ],
        vec![
            (field("a", "c"), field("net/minecraft/World", "field_1_c")),
            (field("b", "d"), field("net/minecraft/Entity", "field_2_d")),
        ],
        vec![(
            method("a", "e", "(Lb;)V"),
            method("net/minecraft/World", "func_3_e", "(Lnet/minecraft/Entity;)V"),
        )],
    )
}

/// srg -> named style table, only partially covering the srg names.
fn srg_to_named() -> ImmutableMapping {
    ImmutableMapping::new(
        vec![],
        vec![(
            field("net/minecraft/World", "field_1_c"),
            field("net/minecraft/World", "worldTime"),
        )],
        vec![(
            method("net/minecraft/World", "func_3_e", "(Lnet/minecraft/Entity;)V"),
            method("net/minecraft/World", "spawn", "(Lnet/minecraft/Entity;)V"),
        )],
    )
}

/// A third table that moves one class.
fn named_to_moved() -> ImmutableMapping {
    ImmutableMapping::new(
        vec![(class("net/minecraft/Entity"), class("net/minecraft/entity/Entity"))],
        vec![],
        vec![],
    )
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn chain_then_serialize() {
    let table = ImmutableMapping::new(
        vec![(class("A"), class("B"))],
        vec![(field("A", "x"), field("B", "y"))],
        vec![],
    );
    let empty = ImmutableMapping::empty();
    let chained = ChainedMapping::pair(&table, &empty);
    insta::assert_snapshot!(serialize_sorted(&chained).join("\n"), @r###"
    CL A B
    FD A/x B/y
    "###);
}

#[test]
fn invert_twice() {
    let mapping = ImmutableMapping::new(vec![(class("A"), class("B"))], vec![], vec![]);
    let inverted = mapping.invert();
    assert_eq!(
        inverted,
        ImmutableMapping::new(vec![(class("B"), class("A"))], vec![], vec![])
    );
    assert_eq!(inverted.invert(), mapping);
}

#[test]
fn renaming_updates_owner_and_keeps_default_name() {
    let source = ImmutableMapping::new(vec![], vec![(field("A", "x"), field("A", "x"))], vec![]);
    let renamer = Renamer::new().with_classes(|c| ClassSymbol::new(format!("{}_r", c)));
    let renamed = RenamingMapping::new(&source, renamer);
    let fields: Vec<_> = renamed.fields().collect();
    assert_eq!(fields, vec![(field("A", "x"), field("A_r", "x"))]);
}

#[test]
fn obf_to_named_end_to_end() {
    let srg = obf_to_srg();
    let named = srg_to_named();
    let chained = ChainedMapping::pair(&srg, &named);
    insta::assert_snapshot!(serialize_sorted(&strip_duplicates(&chained)).join("\n"), @r###"
    CL a net/minecraft/World
    CL b net/minecraft/Entity
    FD a/c net/minecraft/World/worldTime
    FD b/d net/minecraft/Entity/field_2_d
    MD a/e (Lb;)V net/minecraft/World/spawn (Lnet/minecraft/Entity;)V
    "###);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn double_inversion_is_identity_for_injective_tables() {
    let srg = obf_to_srg();
    assert!(srg.inversion().is_exact());
    assert_eq!(srg.invert().invert(), srg);

    let named = srg_to_named();
    let chained = ChainedMapping::pair(&srg, &named);
    let composed = chained.composed().clone();
    assert_eq!(chained.invert().invert(), composed);
}

#[test]
fn composition_keeps_pairs_without_later_entry() {
    let srg = obf_to_srg();
    let named = srg_to_named();
    let composed = compose(&srg, &named);
    for (original, renamed) in srg.fields() {
        if named.get_field(&renamed).is_none() {
            assert_eq!(composed.get_field(&original), Some(renamed));
        }
    }
    for (original, renamed) in srg.classes() {
        assert_eq!(composed.get_class(&original), Some(renamed));
    }
}

#[test]
fn composition_is_associative() {
    let (m1, m2, m3) = (obf_to_srg(), srg_to_named(), named_to_moved());

    let left_inner = ChainedMapping::pair(&m1, &m2);
    let left = ChainedMapping::pair(&left_inner, &m3);

    let right_inner = ChainedMapping::pair(&m2, &m3);
    let right = ChainedMapping::pair(&m1, &right_inner);

    let flat = ChainedMapping::new(vec![&m1 as &dyn Mapping, &m2, &m3]);

    assert_eq!(left.composed(), right.composed());
    assert_eq!(left.composed(), flat.composed());
    assert_eq!(
        left.get_method(&method("a", "e", "(Lb;)V")),
        Some(method(
            "net/minecraft/World",
            "spawn",
            "(Lnet/minecraft/entity/Entity;)V"
        ))
    );
    assert_eq!(
        left.get_field(&field("b", "d")),
        Some(field("net/minecraft/entity/Entity", "field_2_d"))
    );
}

#[test]
fn dedup_is_idempotent() {
    let (srg, named) = (obf_to_srg(), srg_to_named());
    let chained = ChainedMapping::pair(&srg, &named);
    let once = strip_duplicates(&chained);
    assert_eq!(strip_duplicates(&once), once);
}

#[test]
fn dedup_compares_members_by_name() {
    let mapping = ImmutableMapping::new(
        vec![],
        vec![
            (field("A", "foo"), field("B", "foo")),
            (field("A", "foo2"), field("A", "bar")),
        ],
        vec![],
    );
    let stripped = strip_duplicates(&mapping);
    assert_eq!(stripped.get_field(&field("A", "foo")), None);
    assert_eq!(stripped.get_field(&field("A", "foo2")), Some(field("A", "bar")));
}

#[test]
fn serialization_ignores_enumeration_order() {
    let pairs = vec![
        (class("c"), class("Z")),
        (class("a"), class("X")),
        (class("b"), class("Y")),
    ];
    let reversed: Vec<_> = pairs.iter().cloned().rev().collect();

    let forward = ListMapping(pairs.clone());
    let backward = ListMapping(reversed);
    let materialized = ImmutableMapping::new(pairs, vec![], vec![]);

    assert_eq!(serialize_sorted(&forward), serialize_sorted(&backward));
    assert_eq!(serialize_sorted(&forward), serialize_sorted(&materialized));
    assert_eq!(
        serialize_sorted(&forward.invert()),
        serialize_sorted(&backward.invert())
    );
}

/// Class pairs enumerated in insertion order.
struct ListMapping(Vec<(ClassSymbol, ClassSymbol)>);

impl Mapping for ListMapping {
    fn classes(&self) -> Pairs<'_, ClassSymbol> {
        Box::new(self.0.iter().cloned())
    }

    fn fields(&self) -> Pairs<'_, FieldSymbol> {
        Box::new(std::iter::empty())
    }

    fn methods(&self) -> Pairs<'_, MethodSymbol> {
        Box::new(std::iter::empty())
    }

    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol> {
        self.0
            .iter()
            .find(|(o, _)| o == original)
            .map(|(_, r)| r.clone())
    }

    fn get_field(&self, _original: &FieldSymbol) -> Option<FieldSymbol> {
        None
    }

    fn get_method(&self, _original: &MethodSymbol) -> Option<MethodSymbol> {
        None
    }
}
