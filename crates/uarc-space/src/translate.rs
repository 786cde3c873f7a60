// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Browse-path translation.
//!
//! Implements the server side of `TranslateBrowsePathsToNodeIds` for a
//! single path: a bounded depth-first descent through the node graph,
//! filtering each hop by reference type (with optional subtype closure) and
//! target browse name. Failure is reported through OPC UA status codes in
//! the [`BrowsePathResult`]; dead-end branches simply contribute nothing.
//!
//! The module also provides the dotted-path conveniences: `"/"` anchors at
//! the `RootFolder`, segments are separated by `.`, and a segment may carry
//! an `N:` namespace prefix.

use std::collections::HashSet;

use uarc_core::{
    BrowsePath, BrowsePathResult, BrowsePathTarget, NodeId, QualifiedName, RelativePath,
    RelativePathElement, StatusCode, NO_REMAINING_PATH,
};

use crate::space::{AddressSpace, NodeRef};

/// Upper bound on relative-path length; OPC UA paths are short and deeper
/// requests are answered with `BadQueryTooComplex`.
pub const MAX_PATH_DEPTH: usize = 32;

/// Browse name of the subtype edge between reference-type nodes.
const HAS_SUBTYPE: &str = "HasSubtype";

impl AddressSpace {
    // =========================================================================
    // Browse Path Translation
    // =========================================================================

    /// Translates one browse path into the set of matching targets.
    ///
    /// Targets appear in depth-first traversal order and duplicates are
    /// preserved; the caller deduplicates if needed. Only fully-consumed
    /// paths produce targets, marked with the [`NO_REMAINING_PATH`]
    /// sentinel.
    pub fn translate_browse_path(&self, browse_path: &BrowsePath) -> BrowsePathResult {
        if self.find_node(&browse_path.starting_node).is_none() {
            return BrowsePathResult::bad(StatusCode::BadNodeIdUnknown);
        }

        let elements = &browse_path.relative_path.elements;
        let Some(last) = elements.last() else {
            return BrowsePathResult::bad(StatusCode::BadNothingToDo);
        };
        if last.target_name.is_empty() {
            return BrowsePathResult::bad(StatusCode::BadBrowseNameInvalid);
        }
        if elements.len() > MAX_PATH_DEPTH {
            return BrowsePathResult::bad(StatusCode::BadQueryTooComplex);
        }

        let mut targets = Vec::new();
        self.descend(&browse_path.starting_node, elements, 0, &mut targets);

        if targets.is_empty() {
            BrowsePathResult::bad(StatusCode::BadNoMatch)
        } else {
            BrowsePathResult::good(targets)
        }
    }

    /// Depth-first descent over one path element.
    fn descend(
        &self,
        node_id: &NodeId,
        elements: &[RelativePathElement],
        index: usize,
        targets: &mut Vec<BrowsePathTarget>,
    ) {
        let element = &elements[index];
        for child in self.browse_node_by_target_name(node_id, element) {
            if index + 1 == elements.len() {
                targets.push(BrowsePathTarget {
                    target_id: child,
                    remaining_path_index: NO_REMAINING_PATH,
                });
            } else {
                self.descend(&child, elements, index + 1, targets);
            }
        }
    }

    /// Returns the nodes reachable from `node_id` through references
    /// matching the element's filter whose browse name equals the element's
    /// target name.
    ///
    /// Unknown starting nodes and dangling reference targets contribute
    /// nothing.
    pub fn browse_node_by_target_name(
        &self,
        node_id: &NodeId,
        element: &RelativePathElement,
    ) -> Vec<NodeId> {
        let Some(node) = self.find_node(node_id) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for reference in &node.base().references {
            if reference.is_forward == element.is_inverse {
                continue;
            }
            if !self.reference_type_matches(
                &reference.reference_type,
                &element.reference_type_id,
                element.include_subtypes,
            ) {
                continue;
            }
            if let Some(target) = self.find_node(&reference.target_id) {
                if element.matches_browse_name(target.browse_name()) {
                    matches.push(reference.target_id.clone());
                }
            }
        }
        matches
    }

    /// Checks a stored reference's type against a path element's filter.
    ///
    /// The null id and the abstract `References` type (i=31) match every
    /// reference. Otherwise the reference's type must be the filter type
    /// itself or, with `include_subtypes`, a descendant of it along forward
    /// `HasSubtype` edges.
    fn reference_type_matches(
        &self,
        reference_type: &str,
        filter: &NodeId,
        include_subtypes: bool,
    ) -> bool {
        if filter.is_null() || *filter == NodeId::REFERENCES {
            return true;
        }

        let Some(candidate) = self.reference_type_id_by_name(reference_type) else {
            return false;
        };
        if candidate == filter {
            return true;
        }
        if include_subtypes {
            return self.is_reference_subtype_of(candidate, filter);
        }
        false
    }

    /// Walks forward `HasSubtype` edges from `ancestor` looking for
    /// `candidate`. A visited set guards against cycles in the type graph.
    fn is_reference_subtype_of(&self, candidate: &NodeId, ancestor: &NodeId) -> bool {
        let mut stack = vec![ancestor.clone()];
        let mut visited: HashSet<NodeId> = HashSet::new();

        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id.clone()) {
                continue;
            }
            let Some(node) = self.find_node(&node_id) else {
                continue;
            };
            for reference in &node.base().references {
                if reference.is_forward && reference.reference_type == HAS_SUBTYPE {
                    if reference.target_id == *candidate {
                        return true;
                    }
                    stack.push(reference.target_id.clone());
                }
            }
        }
        false
    }

    // =========================================================================
    // Path String Conveniences
    // =========================================================================

    /// Builds a [`BrowsePath`] from a dotted path string.
    ///
    /// The starting designator `"/"` means the `RootFolder` (i=84). The path
    /// splits on `.`; a segment may carry an `N:` namespace prefix. Every
    /// element matches any reference type (null filter, forward, no
    /// subtypes).
    ///
    /// # Errors
    ///
    /// Fails when the starting designator neither matches an alias nor
    /// parses as a node id.
    pub fn construct_browse_path<'a>(
        &self,
        start: impl Into<NodeRef<'a>>,
        path: &str,
    ) -> Result<BrowsePath, uarc_core::IdentifierError> {
        let starting_node = match start.into() {
            NodeRef::Text("/") => NodeId::ROOT_FOLDER,
            other => self.resolve_node_id(other)?,
        };

        let elements = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| RelativePathElement {
                reference_type_id: NodeId::null(),
                is_inverse: false,
                include_subtypes: false,
                target_name: QualifiedName::from(segment),
            })
            .collect();

        Ok(BrowsePath {
            starting_node,
            relative_path: RelativePath { elements },
        })
    }

    /// Resolves a dotted path string to the last matching node.
    ///
    /// Returns `None` when the path does not translate to `Good`.
    pub fn simple_browse_path<'a>(
        &self,
        start: impl Into<NodeRef<'a>>,
        path: &str,
    ) -> Option<NodeId> {
        let browse_path = self.construct_browse_path(start, path).ok()?;
        let result = self.translate_browse_path(&browse_path);
        if result.status_code != StatusCode::Good {
            return None;
        }
        result.targets.last().map(|target| target.target_id.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
