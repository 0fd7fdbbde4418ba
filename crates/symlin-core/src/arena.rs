//! Arena storage for expressions.
//!
//! Every node is hash-consed, so a structurally identical expression is
//! stored once and two handles are equal exactly when their expressions are.

use hashbrown::{HashMap, HashSet};
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::display::ExprDisplay;
use crate::expr::{ExprNode, FunctionId, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::InternTable;
use crate::number::Rational;

/// The arena holding all expressions of one problem.
#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    nodes: InternTable<ExprNode>,
    symbols: InternTable<String>,
}

impl ExprArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: InternTable::with_capacity(capacity),
            symbols: InternTable::new(),
        }
    }

    /// Interns a node, returning the existing handle when it is already stored.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        ExprHandle::new(self.nodes.intern(node))
    }

    /// Returns the node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not produced by this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index()]
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Symbols ===

    /// Interns a symbol name and returns its id.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        SymbolId::new(self.symbols.intern_ref(name))
    }

    /// Returns the name of a symbol.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id.index()).map(String::as_str)
    }

    /// Returns the id of an already interned symbol name.
    #[must_use]
    pub fn lookup_symbol(&self, name: &str) -> Option<SymbolId> {
        self.symbols.lookup(name).map(SymbolId::new)
    }

    /// Creates (or reuses) the symbol expression `name`.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.symbol_expr(id)
    }

    /// Returns the expression for an interned symbol.
    pub fn symbol_expr(&mut self, id: SymbolId) -> ExprHandle {
        self.intern(ExprNode::Symbol(id))
    }

    /// Returns the symbol if `handle` is a bare symbol.
    #[must_use]
    pub fn as_symbol(&self, handle: ExprHandle) -> Option<SymbolId> {
        self.get(handle).as_symbol()
    }

    // === Constructors ===

    /// Creates a numeric literal.
    pub fn number(&mut self, value: Rational) -> ExprHandle {
        self.intern(ExprNode::Number(value))
    }

    /// Creates an integer literal.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.number(Rational::integer(value))
    }

    /// Creates the literal `num / den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn rational(&mut self, num: i64, den: i64) -> ExprHandle {
        let value = Rational::new(num, den).expect("rational literal with zero denominator");
        self.number(value)
    }

    /// The literal `0`.
    pub fn zero(&mut self) -> ExprHandle {
        self.number(Rational::zero())
    }

    /// The literal `1`.
    pub fn one(&mut self) -> ExprHandle {
        self.number(Rational::one())
    }

    /// Returns the value of a numeric literal.
    #[must_use]
    pub fn number_value(&self, handle: ExprHandle) -> Option<&Rational> {
        self.get(handle).as_number()
    }

    /// Creates a sum. An empty sum is `0` and a singleton is its element.
    pub fn add(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.zero(),
            1 => args[0],
            _ => self.intern(ExprNode::Add(args)),
        }
    }

    /// Creates a product. An empty product is `1` and a singleton is its element.
    pub fn mul(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.one(),
            1 => args[0],
            _ => self.intern(ExprNode::Mul(args)),
        }
    }

    /// Creates `lhs - rhs`.
    pub fn sub(&mut self, lhs: ExprHandle, rhs: ExprHandle) -> ExprHandle {
        let negated = self.neg(rhs);
        self.intern(ExprNode::Add(smallvec::smallvec![lhs, negated]))
    }

    /// Creates `num / den`.
    pub fn div(&mut self, num: ExprHandle, den: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Div { num, den })
    }

    /// Creates `-arg`.
    pub fn neg(&mut self, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Neg(arg))
    }

    /// Creates `base ^ exp`.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Creates `base ^ n` for an integer exponent.
    pub fn powi(&mut self, base: ExprHandle, n: i64) -> ExprHandle {
        let exp = self.integer(n);
        self.pow(base, exp)
    }

    /// Applies a built-in function, see [`crate::expr::functions`].
    pub fn function(
        &mut self,
        id: FunctionId,
        args: impl Into<SmallVec<[ExprHandle; 2]>>,
    ) -> ExprHandle {
        self.intern(ExprNode::Function {
            id,
            args: args.into(),
        })
    }

    /// Applies a one-argument built-in function.
    pub fn apply(&mut self, id: FunctionId, arg: ExprHandle) -> ExprHandle {
        self.function(id, smallvec::smallvec![arg])
    }

    // === Queries ===

    /// Returns the symbols of an expression in order of first appearance
    /// (depth first, left to right).
    #[must_use]
    pub fn free_symbols(&self, root: ExprHandle) -> Vec<SymbolId> {
        let mut found = Vec::new();
        let mut seen_symbols = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(handle) = stack.pop() {
            if !visited.insert(handle) {
                continue;
            }
            let node = self.get(handle);
            if let ExprNode::Symbol(id) = node {
                if seen_symbols.insert(*id) {
                    found.push(*id);
                }
            }
            // Reverse so the leftmost child is visited first.
            stack.extend(node.children().into_iter().rev());
        }

        found
    }

    /// Returns true if any symbol of the expression satisfies `pred`.
    pub fn depends_on(&self, root: ExprHandle, pred: impl Fn(SymbolId) -> bool) -> bool {
        self.free_symbols(root).into_iter().any(pred)
    }

    /// Replaces symbols according to `replacements`, rebuilding only the
    /// parts of the tree that change.
    pub fn substitute(
        &mut self,
        root: ExprHandle,
        replacements: &HashMap<SymbolId, ExprHandle>,
    ) -> ExprHandle {
        let mut memo = HashMap::new();
        self.substitute_inner(root, replacements, &mut memo)
    }

    fn substitute_inner(
        &mut self,
        handle: ExprHandle,
        replacements: &HashMap<SymbolId, ExprHandle>,
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&done) = memo.get(&handle) {
            return done;
        }

        let node = self.get(handle).clone();
        let result = match node {
            ExprNode::Number(_) => handle,
            ExprNode::Symbol(id) => replacements.get(&id).copied().unwrap_or(handle),
            ExprNode::Add(args) => {
                let args = self.substitute_all(&args, replacements, memo);
                self.intern(ExprNode::Add(args))
            }
            ExprNode::Mul(args) => {
                let args = self.substitute_all(&args, replacements, memo);
                self.intern(ExprNode::Mul(args))
            }
            ExprNode::Pow { base, exp } => {
                let base = self.substitute_inner(base, replacements, memo);
                let exp = self.substitute_inner(exp, replacements, memo);
                self.intern(ExprNode::Pow { base, exp })
            }
            ExprNode::Neg(arg) => {
                let arg = self.substitute_inner(arg, replacements, memo);
                self.intern(ExprNode::Neg(arg))
            }
            ExprNode::Div { num, den } => {
                let num = self.substitute_inner(num, replacements, memo);
                let den = self.substitute_inner(den, replacements, memo);
                self.intern(ExprNode::Div { num, den })
            }
            ExprNode::Function { id, args } => {
                let args = args
                    .iter()
                    .map(|&arg| self.substitute_inner(arg, replacements, memo))
                    .collect();
                self.intern(ExprNode::Function { id, args })
            }
        };

        memo.insert(handle, result);
        result
    }

    fn substitute_all(
        &mut self,
        args: &[ExprHandle],
        replacements: &HashMap<SymbolId, ExprHandle>,
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> SmallVec<[ExprHandle; 4]> {
        args.iter()
            .map(|&arg| self.substitute_inner(arg, replacements, memo))
            .collect()
    }

    /// Returns a value that renders the expression with symbol names.
    #[must_use]
    pub fn display(&self, handle: ExprHandle) -> ExprDisplay<'_> {
        ExprDisplay::new(self, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_symbols_are_interned() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let y = arena.symbol("y");

        assert_eq!(x, arena.symbol("x"));
        assert_ne!(x, y);
        assert_eq!(arena.lookup_symbol("y"), arena.as_symbol(y));
        assert_eq!(arena.symbol_name(arena.as_symbol(x).unwrap()), Some("x"));
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let one = arena.integer(1);

        let sum1 = arena.add(smallvec![x, one]);
        let sum2 = arena.add(smallvec![x, one]);

        assert_eq!(sum1, sum2);
        // x, 1, (x + 1)
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_degenerate_sums_and_products() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");

        let empty_sum = arena.add(SmallVec::<[ExprHandle; 4]>::new());
        let empty_product = arena.mul(SmallVec::<[ExprHandle; 4]>::new());
        let zero = arena.zero();
        let one = arena.one();

        assert_eq!(empty_sum, zero);
        assert_eq!(empty_product, one);
        assert_eq!(arena.add(smallvec![x]), x);
    }

    #[test]
    fn test_free_symbols_first_appearance() {
        let mut arena = ExprArena::new();
        let b = arena.symbol("b");
        let a = arena.symbol("a");
        let sin_a = arena.apply(crate::functions::SIN, a);
        let prod = arena.mul(smallvec![b, sin_a, b]);

        let symbols = arena.free_symbols(prod);
        let names: Vec<_> = symbols
            .iter()
            .map(|&id| arena.symbol_name(id).unwrap())
            .collect();
        assert_eq!(names, ["b", "a"]);

        let a_id = arena.as_symbol(a).unwrap();
        assert!(arena.depends_on(prod, |id| id == a_id));
    }

    #[test]
    fn test_substitute() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let sum = arena.add(smallvec![x, y]);
        let zero = arena.zero();

        let mut replacements = HashMap::new();
        replacements.insert(arena.as_symbol(x).unwrap(), zero);

        let replaced = arena.substitute(sum, &replacements);
        assert_eq!(arena.add(smallvec![zero, y]), replaced);
        // Untouched subtrees keep their handle.
        let only_y = arena.substitute(y, &replacements);
        assert_eq!(only_y, y);
    }
}
