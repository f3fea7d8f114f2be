//! Provides mechanisms to inspect the inheritance structure of the classes in a [`ClassIndex`]

use crate::structures::FQName;
use crate::{ClassIndex, JavaClass};
use petgraph::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

/// A graph of the super classes and interfaces of every class in an index. Types that aren't
/// in the index don't get a node, so the graph stops wherever the index does.
#[derive(Debug)]
pub struct InheritanceGraph<'a> {
    index: &'a ClassIndex,
    graph: DiGraph<&'a FQName, Inherit>,
    nodes: HashMap<&'a FQName, NodeIndex>,
}

/// How a given type inherits another type
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum InheritKind {
    /// Used from class to class dependencies
    Extends,
    /// An interface that this type implements, or that an interface extends
    Implements,
}

/// An edge of the graph. `position` is where the parent appears in the child's
/// `interfaces` table, and is always zero for super classes.
#[derive(Debug, Copy, Clone)]
struct Inherit {
    kind: InheritKind,
    position: usize,
}

impl<'a> InheritanceGraph<'a> {
    /// Creates the graph for every class in an index
    pub fn new(index: &'a ClassIndex) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for class in index {
            nodes
                .entry(class.this())
                .or_insert_with(|| graph.add_node(class.this()));
        }

        let mut this = Self {
            index,
            graph,
            nodes,
        };
        for class in index {
            // duplicates don't get a say in the shape of the graph
            if !index
                .find(class.this())
                .map_or(false, |found| std::ptr::eq(found, class))
            {
                continue;
            }
            if let Some(super_name) = class.super_name() {
                this.add_inheritance(
                    class.this(),
                    super_name,
                    Inherit {
                        kind: InheritKind::Extends,
                        position: 0,
                    },
                );
            }
            for (position, interface) in class.interfaces().enumerate() {
                this.add_inheritance(
                    class.this(),
                    interface,
                    Inherit {
                        kind: InheritKind::Implements,
                        position,
                    },
                );
            }
        }
        this
    }

    /// add inheritance. returns true only if both classes are in the graph and an existing inheritance
    /// doesn't already exist
    fn add_inheritance(&mut self, class: &FQName, inherits: &FQName, inherit: Inherit) -> bool {
        let (Some(&class), Some(&inherits)) = (self.nodes.get(class), self.nodes.get(inherits))
        else {
            return false;
        };
        if self.graph.contains_edge(class, inherits) {
            return false;
        }
        self.graph.add_edge(class, inherits, inherit);
        true
    }

    fn get_class(&self, node_index: NodeIndex) -> Option<&'a JavaClass> {
        self.index.find(self.graph[node_index])
    }

    fn parents(&self, node: NodeIndex, kind: InheritKind) -> Vec<(NodeIndex, usize)> {
        let mut parents = self
            .graph
            .edges(node)
            .filter(|edge| edge.weight().kind == kind)
            .map(|edge| (edge.target(), edge.weight().position))
            .collect::<Vec<_>>();
        parents.sort_by_key(|&(_, position)| position);
        parents
    }

    /// Gets the classes that this class extends or interfaces it implements that are present in
    /// the index.
    ///
    /// The super class chain comes first, nearest first. Then every interface reachable from the
    /// class or its super classes in breadth first order, with the interfaces of a type visited in
    /// declaration order. Each type appears once, even if the hierarchy is cyclic.
    ///
    /// Returns `None` if the class isn't in the index.
    pub fn inherits<F: AsRef<FQName>>(&self, fqn: F) -> Option<Vec<(&'a JavaClass, InheritKind)>> {
        let &start = self.nodes.get(fqn.as_ref())?;

        let mut output = vec![];
        let mut visited = HashSet::from([start]);
        let mut chain = vec![start];
        let mut current = start;
        while let Some(&(super_class, _)) = self.parents(current, InheritKind::Extends).first() {
            if !visited.insert(super_class) {
                break;
            }
            output.extend(
                self.get_class(super_class)
                    .map(|class| (class, InheritKind::Extends)),
            );
            chain.push(super_class);
            current = super_class;
        }

        let mut queue = VecDeque::new();
        for node in chain {
            queue.extend(self.parents(node, InheritKind::Implements));
        }
        while let Some((interface, _)) = queue.pop_front() {
            if !visited.insert(interface) {
                continue;
            }
            output.extend(
                self.get_class(interface)
                    .map(|class| (class, InheritKind::Implements)),
            );
            queue.extend(self.parents(interface, InheritKind::Implements));
        }

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_bytes, AsFullyQualifiedName};
    use itest_common::ClassFileBuilder;

    fn index(classes: impl IntoIterator<Item = ClassFileBuilder>) -> ClassIndex {
        classes
            .into_iter()
            .map(|builder| parse_bytes(&builder.build()[..]).unwrap_or_else(|e| panic!("{e:#}")))
            .collect()
    }

    fn names(parents: Vec<(&JavaClass, InheritKind)>) -> Vec<(String, InheritKind)> {
        parents
            .into_iter()
            .map(|(class, kind)| (class.this().to_string(), kind))
            .collect()
    }

    #[test]
    fn super_classes_before_interfaces() {
        let index = index([
            ClassFileBuilder::new("Square")
                .extends("Rectangle")
                .implements("Comparable"),
            ClassFileBuilder::new("Rectangle").extends("Shape"),
            ClassFileBuilder::new("Shape").implements("Drawable"),
            ClassFileBuilder::new("Comparable").interface(),
            ClassFileBuilder::new("Drawable").interface().implements("Paintable"),
            ClassFileBuilder::new("Paintable").interface(),
        ]);
        let graph = InheritanceGraph::new(&index);
        let parents = graph.inherits("Square".as_fcq()).expect("square is indexed");
        assert_eq!(
            names(parents),
            [
                ("Rectangle".to_string(), InheritKind::Extends),
                ("Shape".to_string(), InheritKind::Extends),
                ("Comparable".to_string(), InheritKind::Implements),
                ("Drawable".to_string(), InheritKind::Implements),
                ("Paintable".to_string(), InheritKind::Implements),
            ]
        );
    }

    #[test]
    fn interfaces_in_declaration_order() {
        let index = index([
            ClassFileBuilder::new("Impl").implements("B").implements("A"),
            ClassFileBuilder::new("A").interface(),
            ClassFileBuilder::new("B").interface().implements("A"),
        ]);
        let graph = InheritanceGraph::new(&index);
        let parents = graph.inherits("Impl".as_fcq()).unwrap();
        assert_eq!(
            names(parents),
            [
                ("B".to_string(), InheritKind::Implements),
                ("A".to_string(), InheritKind::Implements),
            ]
        );
    }

    #[test]
    fn cycles_terminate() {
        let index = index([
            ClassFileBuilder::new("A").extends("B"),
            ClassFileBuilder::new("B").extends("A"),
        ]);
        let graph = InheritanceGraph::new(&index);
        let parents = graph.inherits("A".as_fcq()).unwrap();
        assert_eq!(names(parents), [("B".to_string(), InheritKind::Extends)]);
    }

    #[test]
    fn missing_types_end_the_walk() {
        let index = index([ClassFileBuilder::new("A").extends("java/lang/Thread")]);
        let graph = InheritanceGraph::new(&index);
        assert!(graph.inherits("A".as_fcq()).unwrap().is_empty());
        assert!(graph.inherits("B".as_fcq()).is_none());
    }
}
