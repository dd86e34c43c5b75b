//! Arena-backed red-black tree (insert-only).
//!
//! The comparator returns a signed distance `cmp(a, b)`: negative when `a`
//! sorts before `b`, zero when equal, positive after. `find_nearest` relies on
//! the magnitude as well as the sign.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    color: Color,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

/// Ordered set keyed by a signed-distance comparator.
///
/// Invariants:
/// - Root is black; no red node has a red child.
/// - Every root-to-leaf path has the same number of black nodes.
/// - Equal keys are kept (inserted to the right of existing equals).
#[derive(Clone)]
pub struct RedBlackTree<T, F>
where
    F: Fn(&T, &T) -> f64,
{
    nodes: Vec<Node<T>>,
    root: Option<usize>,
    cmp: F,
}

impl<T, F> RedBlackTree<T, F>
where
    F: Fn(&T, &T) -> f64,
{
    pub fn new(cmp: F) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// BST insert followed by the red-black fixup.
    pub fn insert(&mut self, value: T) {
        let mut parent = None;
        let mut cur = self.root;
        let mut go_left = false;
        while let Some(c) = cur {
            parent = Some(c);
            go_left = (self.cmp)(&value, &self.nodes[c].value) < 0.0;
            cur = if go_left {
                self.nodes[c].left
            } else {
                self.nodes[c].right
            };
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.nodes[p].left = Some(id),
            Some(p) => self.nodes[p].right = Some(id),
        }
        self.insert_fixup(id);
    }

    /// Exact match (comparator returns zero).
    pub fn find(&self, probe: &T) -> Option<&T> {
        let mut cur = self.root;
        while let Some(c) = cur {
            let d = (self.cmp)(probe, &self.nodes[c].value);
            if d == 0.0 {
                return Some(&self.nodes[c].value);
            }
            cur = if d < 0.0 {
                self.nodes[c].left
            } else {
                self.nodes[c].right
            };
        }
        None
    }

    /// Smallest `|cmp(probe, node)|` along the search path of `probe`.
    pub fn find_nearest(&self, probe: &T) -> Option<&T> {
        let mut best: Option<(usize, f64)> = None;
        let mut cur = self.root;
        while let Some(c) = cur {
            let d = (self.cmp)(probe, &self.nodes[c].value);
            if best.is_none_or(|(_, bd)| d.abs() < bd) {
                best = Some((c, d.abs()));
            }
            if d == 0.0 {
                break;
            }
            cur = if d < 0.0 {
                self.nodes[c].left
            } else {
                self.nodes[c].right
            };
        }
        best.map(|(id, _)| &self.nodes[id].value)
    }

    /// Visit values in ascending order.
    pub fn inorder<V: FnMut(&T)>(&self, mut visit: V) {
        let mut stack: Vec<usize> = Vec::new();
        let mut cur = self.root;
        while cur.is_some() || !stack.is_empty() {
            while let Some(c) = cur {
                stack.push(c);
                cur = self.nodes[c].left;
            }
            if let Some(c) = stack.pop() {
                visit(&self.nodes[c].value);
                cur = self.nodes[c].right;
            }
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.inorder(|v| out.push(v.clone()));
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn go<T>(nodes: &[Node<T>], n: Option<usize>) -> usize {
            match n {
                None => 0,
                Some(i) => 1 + go(nodes, nodes[i].left).max(go(nodes, nodes[i].right)),
            }
        }
        go(&self.nodes, self.root)
    }

    #[inline]
    fn is_red(&self, n: Option<usize>) -> bool {
        n.is_some_and(|i| self.nodes[i].color == Color::Red)
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while let Some(p) = self.nodes[z].parent {
            if self.nodes[p].color == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.nodes[p].parent else {
                break;
            };
            if self.nodes[g].left == Some(p) {
                let uncle = self.nodes[g].right;
                if self.is_red(uncle) {
                    if let Some(u) = uncle {
                        self.nodes[u].color = Color::Black;
                    }
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    z = g;
                } else {
                    let mut p = p;
                    if self.nodes[p].right == Some(z) {
                        z = p;
                        self.rotate_left(z);
                        p = self.nodes[z].parent.unwrap_or(g);
                    }
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.nodes[g].left;
                if self.is_red(uncle) {
                    if let Some(u) = uncle {
                        self.nodes[u].color = Color::Black;
                    }
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    z = g;
                } else {
                    let mut p = p;
                    if self.nodes[p].left == Some(z) {
                        z = p;
                        self.rotate_right(z);
                        p = self.nodes[z].parent.unwrap_or(g);
                    }
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    self.rotate_left(g);
                }
            }
        }
        if let Some(r) = self.root {
            self.nodes[r].color = Color::Black;
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let Some(y) = self.nodes[x].right else {
            return;
        };
        let y_left = self.nodes[y].left;
        self.nodes[x].right = y_left;
        if let Some(b) = y_left {
            self.nodes[b].parent = Some(x);
        }
        self.replace_child(x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: usize) {
        let Some(y) = self.nodes[x].left else {
            return;
        };
        let y_right = self.nodes[y].right;
        self.nodes[x].left = y_right;
        if let Some(b) = y_right {
            self.nodes[b].parent = Some(x);
        }
        self.replace_child(x, y);
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Put `new` where `old` hangs under its parent (or at the root).
    fn replace_child(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = Some(new);
                } else {
                    self.nodes[p].right = Some(new);
                }
            }
        }
    }

    /// Black height if all red-black invariants hold.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Option<usize> {
        fn go<T>(nodes: &[Node<T>], n: Option<usize>) -> Option<usize> {
            let Some(i) = n else {
                return Some(1);
            };
            let node = &nodes[i];
            if node.color == Color::Red {
                for c in [node.left, node.right].into_iter().flatten() {
                    if nodes[c].color == Color::Red {
                        return None;
                    }
                }
            }
            for c in [node.left, node.right].into_iter().flatten() {
                if nodes[c].parent != Some(i) {
                    return None;
                }
            }
            let l = go(nodes, node.left)?;
            let r = go(nodes, node.right)?;
            if l != r {
                return None;
            }
            Some(l + usize::from(node.color == Color::Black))
        }
        if self.is_red(self.root) {
            return None;
        }
        go(&self.nodes, self.root)
    }
}
