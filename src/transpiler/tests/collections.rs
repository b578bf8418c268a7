//! Collection columns merged into insert and update statements.

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::binder::InlineBinder;
use crate::config::ConnectionConfig;
use crate::error::CqlError;
use crate::transpiler::ToCql;

#[test]
fn test_insert_scalars_then_collections() {
    let stmt = QueryDescriptor::insert("users")
        .column("id", 1)
        .column("name", "ann")
        .insert_collection(CollectionMutation::set("tags", ["a", "b"]))
        .insert_collection(CollectionMutation::list("scores", [10, 20]))
        .insert_collection(CollectionMutation::map("prefs", [("lang", "en")]))
        .to_cql()
        .unwrap();

    assert_eq!(
        stmt.text,
        "insert into users (id, name, tags, scores, prefs) values (?, ?, {'a', 'b'}, [10, 20], {'lang':'en'})"
    );
    assert_eq!(stmt.parameters, vec![Scalar::from(1), Scalar::from("ann")]);
    assert_eq!(
        stmt.bind().unwrap(),
        "insert into users (id, name, tags, scores, prefs) values (1, 'ann', {'a', 'b'}, [10, 20], {'lang':'en'})"
    );
}

#[test]
fn test_insert_only_collections() {
    let stmt = QueryDescriptor::insert("users")
        .insert_collection(CollectionMutation::set("tags", ["solo"]))
        .to_cql()
        .unwrap();
    assert_eq!(stmt.text, "insert into users (tags) values ({'solo'})");
    assert!(stmt.parameters.is_empty());
}

#[test]
fn test_insert_collection_with_operation_rejected() {
    let err = QueryDescriptor::insert("users")
        .column("id", 1)
        .insert_collection(CollectionMutation::set("tags", ["x"]).append())
        .to_cql()
        .unwrap_err();
    assert!(matches!(err, CqlError::MalformedDescriptor(_)));
}

#[test]
fn test_batch_insert_repeats_collections() {
    let mut desc = QueryDescriptor::insert("users")
        .column("id", 1)
        .insert_collection(CollectionMutation::set("tags", ["new"]));
    desc.batch_rows = vec![row([("id", Scalar::from(2))])];

    assert_eq!(
        desc.to_cql().unwrap().bind().unwrap(),
        "begin batch insert into users (id, tags) values (1, {'new'}); insert into users (id, tags) values (2, {'new'}); apply batch"
    );
}

#[test]
fn test_update_append() {
    let stmt = QueryDescriptor::update("users")
        .update_collection(CollectionMutation::set("tags", ["x"]).append())
        .filter("where id = ?", vec![Scalar::from(1)])
        .to_cql()
        .unwrap();
    assert_eq!(stmt.text, "update users set tags=tags+{'x'} where id = ?");
}

#[test]
fn test_update_remove() {
    let stmt = QueryDescriptor::update("users")
        .update_collection(CollectionMutation::set("tags", ["x"]).remove())
        .to_cql()
        .unwrap();
    assert_eq!(stmt.text, "update users set tags=tags-{'x'}");
}

#[test]
fn test_update_replace() {
    let stmt = QueryDescriptor::update("users")
        .update_collection(CollectionMutation::set("tags", ["x"]))
        .to_cql()
        .unwrap();
    assert_eq!(stmt.text, "update users set tags={'x'}");
}

#[test]
fn test_update_scalars_then_collections() {
    let stmt = QueryDescriptor::update("users")
        .column("name", "bob")
        .update_collection(CollectionMutation::list("log", ["login"]).append())
        .update_collection(CollectionMutation::map("prefs", [("theme", "dark")]))
        .filter("where id = ?", vec![Scalar::from(9)])
        .to_cql()
        .unwrap();
    assert_eq!(
        stmt.text,
        "update users set name = ?, log=log+['login'], prefs={'theme':'dark'} where id = ?"
    );
    assert_eq!(
        stmt.bind().unwrap(),
        "update users set name = 'bob', log=log+['login'], prefs={'theme':'dark'} where id = 9"
    );
}

#[test]
fn test_update_positional_map() {
    let stmt = QueryDescriptor::update("t")
        .update_collection(CollectionMutation::map("m", [(1, "a"), (2, "b")]))
        .to_cql()
        .unwrap();
    assert_eq!(stmt.text, "update t set m={'a', 'b'}");
}

#[test]
fn test_markers_are_matched_textually() {
    let stmt = QueryDescriptor::update("t")
        .update_collection(CollectionMutation::set("q", ["what?"]))
        .filter("where id = ?", vec![Scalar::from(1)])
        .to_cql()
        .unwrap();
    assert_eq!(stmt.parameters, vec![Scalar::from(1)]);
    // A `?` inside an inlined literal still counts as a marker.
    assert!(matches!(
        stmt.bind(),
        Err(CqlError::BindingCountMismatch { placeholders: 2, values: 1 })
    ));
}

#[test]
fn test_finalize_allow_filtering() {
    let config = ConnectionConfig {
        allow_filtering: true,
        ..ConnectionConfig::default()
    };

    let select = QueryDescriptor::select("users")
        .filter("where age > ?", vec![Scalar::from(30)])
        .to_cql()
        .unwrap();
    assert_eq!(
        select.finalize(&config, &InlineBinder).unwrap(),
        "select * from users where age > 30 allow filtering"
    );

    let update = QueryDescriptor::update("users")
        .column("age", 31)
        .to_cql()
        .unwrap();
    assert_eq!(
        update.finalize(&config, &InlineBinder).unwrap(),
        "update users set age = 31"
    );
}
