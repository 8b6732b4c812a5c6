//! Targeted property paths
//!
//! A path is built statically from the root type down to the leaf member,
//! one accessor per segment:
//!
//! ```
//! use optbind::binding::{Field, Member, Path};
//!
//! #[derive(Default)]
//! struct Child { leaf: i32 }
//! #[derive(Default)]
//! struct Root { child: Option<Child> }
//!
//! let path = Path::<Root, Root>::root()
//!     .member(Member::lazy("child", |r: &Root| &r.child, |r: &mut Root| &mut r.child))
//!     .field(Field::new("leaf", |c: &mut Child, v: i32| c.leaf = v));
//! assert_eq!(path.dotted(), "child.leaf");
//! ```
//!
//! Intermediate members are either inline (always present) or optional
//! (`Option<N>` slots). Optional members can carry a constructor so an absent
//! node is built on first write; without one an absent node leaves the path
//! unbound.

use serde::Serialize;

use crate::convert::{BindTarget, Multiplicity};

/// Descriptor of one segment of a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetedProperty {
    pub name: String,
    pub type_name: &'static str,
    pub multiplicity: Multiplicity,
    /// Leaf segments only: a setter exists
    pub writable: bool,
    /// Can be built when absent; inline members always can
    pub constructible: bool,
    /// Leaf is addressed by index and cannot be bound
    pub indexed: bool,
    /// Position of the parent segment, `None` for members of the root
    pub parent: Option<usize>,
}

enum Access<P, N> {
    Inline {
        get: fn(&P) -> &N,
        get_mut: fn(&mut P) -> &mut N,
    },
    Optional {
        get: fn(&P) -> &Option<N>,
        get_mut: fn(&mut P) -> &mut Option<N>,
        construct: Option<fn() -> N>,
    },
}

impl<P, N> Clone for Access<P, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, N> Copy for Access<P, N> {}

impl<P, N> Access<P, N> {
    fn get<'a>(&self, parent: &'a P) -> Option<&'a N> {
        match self {
            Self::Inline { get, .. } => Some(get(parent)),
            Self::Optional { get, .. } => get(parent).as_ref(),
        }
    }

    fn get_or_construct<'a>(&self, parent: &'a mut P) -> Option<&'a mut N> {
        match self {
            Self::Inline { get_mut, .. } => Some(get_mut(parent)),
            Self::Optional {
                get_mut, construct, ..
            } => {
                let slot = get_mut(parent);
                if slot.is_none() {
                    let construct = (*construct)?;
                    log::trace!("Constructing absent {}", std::any::type_name::<N>());
                    *slot = Some(construct());
                }
                slot.as_mut()
            }
        }
    }

    fn constructible(&self) -> bool {
        match self {
            Self::Inline { .. } => true,
            Self::Optional { construct, .. } => construct.is_some(),
        }
    }
}

/// Accessor for an intermediate member of `P` holding an `N`
pub struct Member<P, N> {
    name: String,
    access: Access<P, N>,
}

impl<P, N> Member<P, N> {
    /// A member that is always present
    pub fn inline(name: impl Into<String>, get: fn(&P) -> &N, get_mut: fn(&mut P) -> &mut N) -> Self {
        Self {
            name: name.into(),
            access: Access::Inline { get, get_mut },
        }
    }

    /// An `Option<N>` member that cannot be built when absent
    pub fn optional(
        name: impl Into<String>,
        get: fn(&P) -> &Option<N>,
        get_mut: fn(&mut P) -> &mut Option<N>,
    ) -> Self {
        Self {
            name: name.into(),
            access: Access::Optional {
                get,
                get_mut,
                construct: None,
            },
        }
    }

    /// An `Option<N>` member default-constructed when absent
    pub fn lazy(
        name: impl Into<String>,
        get: fn(&P) -> &Option<N>,
        get_mut: fn(&mut P) -> &mut Option<N>,
    ) -> Self
    where
        N: Default,
    {
        Self::optional(name, get, get_mut).with_constructor(N::default)
    }

    /// Build absent nodes with `construct`; no effect on inline members
    pub fn with_constructor(mut self, construct: fn() -> N) -> Self {
        if let Access::Optional { construct: slot, .. } = &mut self.access {
            *slot = Some(construct);
        }
        self
    }
}

/// Setter for the leaf member of `P`
pub struct Field<P, T> {
    name: String,
    set: Option<fn(&mut P, T)>,
    indexed: bool,
}

impl<P, T> Field<P, T> {
    pub fn new(name: impl Into<String>, set: fn(&mut P, T)) -> Self {
        Self {
            name: name.into(),
            set: Some(set),
            indexed: false,
        }
    }

    /// A member with no setter
    pub fn read_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set: None,
            indexed: false,
        }
    }

    /// A member addressed by index, such as one slot of a fixed array
    pub fn indexed(name: impl Into<String>, set: fn(&mut P, T)) -> Self {
        Self {
            name: name.into(),
            set: Some(set),
            indexed: true,
        }
    }
}

type Peek<R, C> = Box<dyn for<'a> Fn(&'a R) -> Result<&'a C, usize>>;
type Reach<R, C> = Box<dyn for<'a> Fn(&'a mut R) -> Option<&'a mut C>>;

fn peek_fn<R, C, F>(f: F) -> Peek<R, C>
where
    F: for<'a> Fn(&'a R) -> Result<&'a C, usize> + 'static,
{
    Box::new(f)
}

fn reach_fn<R, C, F>(f: F) -> Reach<R, C>
where
    F: for<'a> Fn(&'a mut R) -> Option<&'a mut C> + 'static,
{
    Box::new(f)
}

/// A partial path from root `R` to an intermediate node `C`
pub struct Path<R, C> {
    nodes: Vec<TargetedProperty>,
    peek: Peek<R, C>,
    reach: Reach<R, C>,
}

impl<R: 'static> Path<R, R> {
    pub fn root() -> Self {
        Self {
            nodes: Vec::new(),
            peek: peek_fn(|root: &R| Ok(root)),
            reach: reach_fn(|root: &mut R| Some(root)),
        }
    }
}

impl<R: 'static, C: 'static> Path<R, C> {
    /// Descend into an intermediate member
    pub fn member<N: 'static>(self, member: Member<C, N>) -> Path<R, N> {
        let index = self.nodes.len();
        let mut nodes = self.nodes;
        nodes.push(TargetedProperty {
            name: member.name,
            type_name: std::any::type_name::<N>(),
            multiplicity: Multiplicity::SingleValue,
            writable: true,
            constructible: member.access.constructible(),
            indexed: false,
            parent: index.checked_sub(1),
        });

        let access = member.access;
        let parent_peek = self.peek;
        let parent_reach = self.reach;
        Path {
            nodes,
            peek: peek_fn(move |root: &R| {
                let parent = parent_peek(root)?;
                access.get(parent).ok_or(index)
            }),
            reach: reach_fn(move |root: &mut R| {
                let parent = parent_reach(root)?;
                access.get_or_construct(parent)
            }),
        }
    }

    /// Finish the path at a leaf member
    pub fn field<T: BindTarget>(self, field: Field<C, T>) -> PropertyPath<R, T> {
        let index = self.nodes.len();
        let mut nodes = self.nodes;
        nodes.push(TargetedProperty {
            name: field.name,
            type_name: T::type_name(),
            multiplicity: T::MULTIPLICITY,
            writable: field.set.is_some(),
            constructible: true,
            indexed: field.indexed,
            parent: index.checked_sub(1),
        });

        let peek = self.peek;
        let reach = self.reach;
        let set = field.set;
        PropertyPath {
            nodes,
            peek: Box::new(move |root: &R| peek(root).map(|_| ())),
            write: Box::new(move |root: &mut R, value: T| match (reach(root), set) {
                (Some(parent), Some(set)) => {
                    set(parent, value);
                    true
                }
                _ => false,
            }),
        }
    }
}

/// Why a path cannot take a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathDefect {
    /// The leaf's type or accessor cannot be bound
    Unsupported(String),
    /// An absent intermediate node cannot be built
    Unbound(String),
}

impl PathDefect {
    pub fn message(&self) -> &str {
        match self {
            Self::Unsupported(message) | Self::Unbound(message) => message,
        }
    }
}

/// A complete path from root `R` to a leaf of type `T`
pub struct PropertyPath<R, T> {
    nodes: Vec<TargetedProperty>,
    peek: Box<dyn Fn(&R) -> Result<(), usize>>,
    write: Box<dyn Fn(&mut R, T) -> bool>,
}

impl<R, T> std::fmt::Debug for PropertyPath<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyPath")
            .field("path", &self.dotted())
            .finish()
    }
}

impl<R, T> PropertyPath<R, T> {
    pub fn nodes(&self) -> &[TargetedProperty] {
        &self.nodes
    }

    pub fn leaf(&self) -> &TargetedProperty {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Member names joined with dots
    pub fn dotted(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Problems with the leaf itself, independent of any live object
    pub fn leaf_defect(&self) -> Option<PathDefect> {
        let leaf = self.leaf();
        if leaf.multiplicity == Multiplicity::Unsupported {
            Some(PathDefect::Unsupported(format!(
                "{} cannot be bound to {}",
                leaf.type_name, leaf.name
            )))
        } else if leaf.indexed {
            Some(PathDefect::Unsupported(format!(
                "{} is an indexed member",
                leaf.name
            )))
        } else if !leaf.writable {
            Some(PathDefect::Unsupported(format!("{} has no setter", leaf.name)))
        } else {
            None
        }
    }

    /// Check the live graph can be written without touching it
    pub fn classify(&self, root: &R) -> Option<PathDefect> {
        if let Some(defect) = self.leaf_defect() {
            return Some(defect);
        }
        let absent = (self.peek)(root).err()?;
        let leaf = self.nodes.len() - 1;
        self.nodes[absent..leaf]
            .iter()
            .find(|n| !n.constructible)
            .map(|n| PathDefect::Unbound(format!("{} is absent and cannot be constructed", n.name)))
    }

    /// Write `value`, building absent nodes on the way
    pub fn write(&self, root: &mut R, value: T) -> bool {
        (self.write)(root, value)
    }
}
