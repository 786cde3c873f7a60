// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Browse-path translation integration tests.
//!
//! These tests drive the address space the way a service layer would: build
//! a small space through `create_node`, then translate paths against it and
//! check the OPC UA status-code semantics.

use uarc_core::{
    BrowsePath, NodeClass, NodeId, QualifiedName, RelativePath, RelativePathElement, StatusCode,
    NO_REMAINING_PATH,
};
use uarc_space::{AddressSpace, NodeDefinition, Reference, ReferenceDescriptor};

/// A minimal space: the `Organizes` reference type, an alias, and
/// Root (i=84) organizing Objects (i=85).
fn minimal_space() -> AddressSpace {
    let mut space = AddressSpace::new();

    space
        .create_node(
            NodeDefinition::new(NodeId::numeric(0, 35), NodeClass::ReferenceType, "Organizes")
                .with_inverse_name("OrganizedBy"),
        )
        .unwrap();
    space.add_alias("HasTypeDefinition", NodeId::numeric(0, 40));

    space
        .create_node(NodeDefinition::new(
            NodeId::ROOT_FOLDER,
            NodeClass::Object,
            "Root",
        ))
        .unwrap();
    space
        .create_node(NodeDefinition::new(
            NodeId::OBJECTS_FOLDER,
            NodeClass::Object,
            "Objects",
        ))
        .unwrap();

    space
        .add_reference(
            &NodeId::ROOT_FOLDER,
            Reference::forward("Organizes", NodeId::OBJECTS_FOLDER).unwrap(),
        )
        .unwrap();

    space
}

#[test]
fn simple_browse_path_finds_objects_folder() {
    let space = minimal_space();

    let target = space.simple_browse_path("/", "Objects");
    assert_eq!(target, Some(NodeId::OBJECTS_FOLDER));
}

#[test]
fn simple_browse_path_misses_unknown_name() {
    let space = minimal_space();

    assert_eq!(space.simple_browse_path("/", "Missing"), None);

    let browse_path = space.construct_browse_path("/", "Missing").unwrap();
    let result = space.translate_browse_path(&browse_path);
    assert_eq!(result.status_code, StatusCode::BadNoMatch);
    assert!(result.targets.is_empty());
}

#[test]
fn empty_relative_path_is_nothing_to_do() {
    let space = minimal_space();

    let browse_path = BrowsePath {
        starting_node: NodeId::ROOT_FOLDER,
        relative_path: RelativePath::default(),
    };
    let result = space.translate_browse_path(&browse_path);
    assert_eq!(result.status_code, StatusCode::BadNothingToDo);
}

#[test]
fn empty_last_target_name_is_invalid() {
    let space = minimal_space();

    let browse_path = BrowsePath {
        starting_node: NodeId::ROOT_FOLDER,
        relative_path: RelativePath {
            elements: vec![RelativePathElement::any_reference(QualifiedName::standard(""))],
        },
    };
    let result = space.translate_browse_path(&browse_path);
    assert_eq!(result.status_code, StatusCode::BadBrowseNameInvalid);
}

#[test]
fn normalize_flips_inverse_names() {
    let space = minimal_space();

    let normalized =
        space.normalize_reference_type(&ReferenceDescriptor::new("OrganizedBy", true));
    assert_eq!(normalized, ReferenceDescriptor::new("Organizes", false));
}

#[test]
fn full_match_carries_the_sentinel() {
    let space = minimal_space();

    let browse_path = space.construct_browse_path("/", "Objects").unwrap();
    let result = space.translate_browse_path(&browse_path);

    assert_eq!(result.status_code, StatusCode::Good);
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].remaining_path_index, NO_REMAINING_PATH);
}

#[test]
fn alias_start_node_resolves() {
    let mut space = minimal_space();
    space.add_alias("TheRoot", NodeId::ROOT_FOLDER);

    assert_eq!(
        space.simple_browse_path("TheRoot", "Objects"),
        Some(NodeId::OBJECTS_FOLDER)
    );
}

#[test]
fn registered_nodes_resolve_by_id() {
    let space = minimal_space();

    let root = space.find_object("i=84").unwrap();
    assert_eq!(root.browse_name(), &QualifiedName::standard("Root"));
    assert!(space.find_object("i=999").is_none());
}

#[test]
fn duplicate_targets_are_preserved() {
    let mut space = minimal_space();

    // A second Organizes edge to the same target produces two identical
    // matches; translation must not deduplicate.
    space
        .add_reference(
            &NodeId::ROOT_FOLDER,
            Reference::forward("Organizes", NodeId::OBJECTS_FOLDER).unwrap(),
        )
        .unwrap();

    let browse_path = space.construct_browse_path("/", "Objects").unwrap();
    let result = space.translate_browse_path(&browse_path);
    assert_eq!(result.status_code, StatusCode::Good);
    assert_eq!(result.targets.len(), 2);
}
