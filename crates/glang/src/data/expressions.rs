// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::binders::{Binder, Binding, FieldDecl};
use crate::data::types::Type;

/// Literal values. Every numeric literal records its width so the generated
/// term has exactly the source semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Unit,
    UInt64(u64),
    UInt32(u32),
    Byte(u8),
    String(String),
    /// nil pointer
    Null,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Plus,
    Minus,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessEq,
    GreaterEq,
    /// string concatenation
    Append,
    Mul,
    Quot,
    Rem,
    And,
    Or,
    Xor,
    /// bit clear (`&^`)
    AndNot,
    LAnd,
    LOr,
    Shl,
    Shr,
}

impl BinOp {
    pub const ALL: [BinOp; 20] = [
        BinOp::Plus,
        BinOp::Minus,
        BinOp::Equals,
        BinOp::NotEquals,
        BinOp::LessThan,
        BinOp::GreaterThan,
        BinOp::LessEq,
        BinOp::GreaterEq,
        BinOp::Append,
        BinOp::Mul,
        BinOp::Quot,
        BinOp::Rem,
        BinOp::And,
        BinOp::Or,
        BinOp::Xor,
        BinOp::AndNot,
        BinOp::LAnd,
        BinOp::LOr,
        BinOp::Shl,
        BinOp::Shr,
    ];
}

/// Function application. Always has at least one argument: a call with no
/// arguments is applied to the unit literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    func: Box<Expr>,
    args: Vec<Expr>,
}

impl CallExpr {
    pub fn new(func: Expr, args: Vec<Expr>) -> Self {
        let args = if args.is_empty() {
            vec![Expr::Literal(Literal::Unit)]
        } else {
            args
        };
        Self {
            func: Box::new(func),
            args,
        }
    }

    pub fn func(&self) -> &Expr {
        &self.func
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

/// Record construction with named fields.
///
/// Field order is kept as written; it fixes the argument order of the
/// generated constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLiteral {
    struct_name: String,
    fields: Vec<(String, Expr)>,
}

impl StructLiteral {
    pub fn new(struct_name: impl Into<String>) -> Self {
        Self {
            struct_name: struct_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: impl Into<String>, value: Expr) {
        self.fields.push((field.into(), value));
    }

    pub fn with_field(mut self, field: impl Into<String>, value: Expr) -> Self {
        self.add_field(field, value);
        self
    }

    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    pub fn fields(&self) -> &[(String, Expr)] {
        &self.fields
    }
}

/// GooseLang expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Gallina identifier, emitted literally
    GallinaIdent(String),
    /// Identifier from another Go package
    PackageIdent { package: String, ident: String },
    /// GooseLang variable, emitted quoted
    Var(String),
    /// Gallina string, emitted quoted
    GallinaString(String),
    Literal(Literal),

    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Not(Box<Expr>),
    Call(CallExpr),
    StructLiteral(StructLiteral),
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    /// Source-level parentheses
    Paren(Box<Expr>),

    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// The init statement wraps the loop so it can use the bindings it introduces.
    ForLoop {
        cond: Box<Expr>,
        post: Box<Expr>,
        body: Box<Expr>,
    },
    ForRangeSlice {
        key: Binder,
        value: Binder,
        elem_type: Type,
        slice: Box<Expr>,
        body: Box<Expr>,
    },
    ForRangeMap {
        key: Binder,
        value: Binder,
        map: Box<Expr>,
        body: Box<Expr>,
    },
    /// Spawn a thread running `body`; the body may capture the environment.
    Spawn(Box<Expr>),

    Load {
        ptr: Box<Expr>,
        ty: Type,
    },
    Store {
        dst: Box<Expr>,
        ty: Type,
        value: Box<Expr>,
    },
    Ref {
        value: Box<Expr>,
        ty: Type,
    },

    Let {
        binding: Binding,
        value: Box<Expr>,
        cont: Box<Expr>,
    },
    Do(Box<Expr>),
    FuncLit {
        params: Vec<FieldDecl>,
        body: Box<Expr>,
    },
    Return(Box<Expr>),
    Break,
    Continue,
    /// A Go logging call kept as a comment
    Logging(String),
}

impl Expr {
    /// The no-op statement
    pub fn skip() -> Self {
        Expr::gallina("Skip")
    }

    pub fn gallina(ident: impl Into<String>) -> Self {
        Expr::GallinaIdent(ident.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn package_ident(package: impl Into<String>, ident: impl Into<String>) -> Self {
        Expr::PackageIdent {
            package: package.into(),
            ident: ident.into(),
        }
    }

    pub fn unit() -> Self {
        Expr::Literal(Literal::Unit)
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }

    pub fn u64(v: u64) -> Self {
        Expr::Literal(Literal::UInt64(v))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr::new(func, args))
    }

    pub fn binop(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn negate(e: Expr) -> Self {
        Expr::Not(Box::new(e))
    }

    /// Multiple results become a tuple; a single result is not wrapped.
    pub fn tuple(mut es: Vec<Expr>) -> Self {
        if es.len() == 1 {
            es.remove(0)
        } else {
            Expr::Tuple(es)
        }
    }

    pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn for_loop(cond: Expr, post: Expr, body: Expr) -> Self {
        Expr::ForLoop {
            cond: Box::new(cond),
            post: Box::new(post),
            body: Box::new(body),
        }
    }

    pub fn spawn(body: Expr) -> Self {
        Expr::Spawn(Box::new(body))
    }

    pub fn load(ptr: Expr, ty: Type) -> Self {
        Expr::Load {
            ptr: Box::new(ptr),
            ty,
        }
    }

    pub fn store(dst: Expr, ty: Type, value: Expr) -> Self {
        Expr::Store {
            dst: Box::new(dst),
            ty,
            value: Box::new(value),
        }
    }

    pub fn alloc_ref(value: Expr, ty: Type) -> Self {
        Expr::Ref {
            value: Box::new(value),
            ty,
        }
    }

    pub fn bind(binding: Binding, value: Expr, cont: Expr) -> Self {
        Expr::Let {
            binding,
            value: Box::new(value),
            cont: Box::new(cont),
        }
    }

    pub fn let_single(name: impl Into<Binder>, value: Expr, cont: Expr) -> Self {
        Expr::bind(Binding::Single(name.into()), value, cont)
    }

    /// `do: e;;; cont`
    pub fn do_seq(e: Expr, cont: Expr) -> Self {
        Expr::bind(Binding::Anonymous, Expr::Do(Box::new(e)), cont)
    }

    pub fn func_lit(params: Vec<FieldDecl>, body: Expr) -> Self {
        Expr::FuncLit {
            params,
            body: Box::new(body),
        }
    }

    pub fn ret(value: Expr) -> Self {
        Expr::Return(Box::new(value))
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<CallExpr> for Expr {
    fn from(call: CallExpr) -> Self {
        Expr::Call(call)
    }
}

impl From<StructLiteral> for Expr {
    fn from(lit: StructLiteral) -> Self {
        Expr::StructLiteral(lit)
    }
}

/// Name of the Gallina definition implementing method `method_name` of `type_name`.
pub fn type_method(type_name: &str, method_name: &str) -> String {
    format!("{}__{}", type_name, method_name)
}

/// Projection of a method out of an interface value.
pub fn interface_method(interface_name: &str, method_name: &str) -> String {
    format!("(struct.get {} \"{}\")", interface_name, method_name)
}
