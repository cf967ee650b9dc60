//! Ordered word tree backing the inverted index.
//!
//! Keys compare byte-wise. After every insertion each node on the path back to
//! the root gets at most one single rotation when its children's heights differ
//! by more than one. This is not a full AVL rebalance: zig-zag shapes are left
//! as they are, and the exact shapes it produces are part of the output
//! contract since reports are generated from them.

use crate::doclist::DocList;
use std::cmp::Ordering;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    word: String,
    documents: DocList,
    height: usize,
    left: Link,
    right: Link,
}

impl Node {
    fn new(word: &str, filename: &str) -> Box<Node> {
        Box::new(Node { word: word.to_string(), documents: DocList::singleton(filename), height: 1, left: None, right: None })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// Promote `node.right`; its former left subtree becomes `node.right`.
fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else { return node };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Promote `node.left`; its former right subtree becomes `node.left`.
fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else { return node };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rebalance(node: Box<Node>) -> Box<Node> {
    let (hl, hr) = (height(&node.left), height(&node.right));
    if hl > hr + 1 {
        rotate_right(node)
    } else if hr > hl + 1 {
        rotate_left(node)
    } else {
        node
    }
}

/// Returns the new subtree root and whether a new word node was created.
fn insert_at(link: Link, word: &str, filename: &str) -> (Box<Node>, bool) {
    let mut node = match link {
        None => return (Node::new(word, filename), true),
        Some(node) => node,
    };
    let created = match word.cmp(node.word.as_str()) {
        Ordering::Less => {
            let (child, created) = insert_at(node.left.take(), word, filename);
            node.left = Some(child);
            created
        }
        Ordering::Greater => {
            let (child, created) = insert_at(node.right.take(), word, filename);
            node.right = Some(child);
            created
        }
        Ordering::Equal => {
            node.documents.insert_or_bump(filename);
            false
        }
    };
    node.update_height();
    (rebalance(node), created)
}

#[derive(Debug, Default)]
pub struct WordIndexTree {
    root: Link,
    len: usize,
    pub(crate) relative_frequencies: bool,
}

impl WordIndexTree {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `word` in `filename`.
    pub fn insert(&mut self, word: &str, filename: &str) {
        debug_assert!(!self.relative_frequencies, "insert after term frequencies were applied");
        let (root, created) = insert_at(self.root.take(), word, filename);
        self.root = Some(root);
        if created {
            self.len += 1;
        }
    }

    pub fn find(&self, word: &str) -> Option<&DocList> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match word.cmp(node.word.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.documents),
            };
        }
        None
    }

    pub fn contains(&self, word: &str) -> bool { self.find(word).is_some() }

    /// Number of distinct words.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    pub fn height(&self) -> usize { height(&self.root) }

    /// Whether the stored frequencies are relative (post term-frequency pass) rather than raw counts.
    pub fn has_relative_frequencies(&self) -> bool { self.relative_frequencies }

    /// Words in ascending order with their document lists.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Visit every document list mutably. Visiting order is unspecified.
    pub(crate) fn try_for_each_list_mut<E>(&mut self, mut f: impl FnMut(&str, &mut DocList) -> Result<(), E>) -> Result<(), E> {
        let mut stack: Vec<&mut Node> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = stack.pop() {
            let Node { word, documents, left, right, .. } = node;
            f(word, documents)?;
            stack.extend(left.as_deref_mut());
            stack.extend(right.as_deref_mut());
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a DocList);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.word.as_str(), &node.documents))
    }
}

impl<'a> IntoIterator for &'a WordIndexTree {
    type Item = (&'a str, &'a DocList);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> { self.iter() }
}
