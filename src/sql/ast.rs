// SQL fragment Abstract Syntax Tree (AST) definitions

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    pub distinct: bool,
    pub projections: Vec<SelectItem>,
    pub from: Vec<TableReference>,
    pub where_clause: Option<Expression>,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
    pub order_by: Vec<OrderByItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    AllColumns,
    AllColumnsFrom(String),
    Expression(Expression, Option<String>), // expression, alias
}

/// Table source in a FROM clause
#[derive(Debug, Clone, PartialEq)]
pub enum TableReference {
    Named(NamedTableReference),
    Derived {
        subquery: Box<SelectStatement>,
        alias: String,
    },
    Join(Box<Join>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedTableReference {
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub left: TableReference,
    pub right: TableReference,
    pub on: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expression: Expression,
    pub direction: OrderDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Dotted identifier chain such as `name`, `p.name` or `dbo.Person.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference {
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Number(String),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expression>,
    pub distinct: bool,
}

/// `CASE WHEN cond THEN result ... ELSE result END`
#[derive(Debug, Clone, PartialEq)]
pub struct SearchedCase {
    pub when_clauses: Vec<WhenClause>,
    pub else_clause: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub condition: Expression,
    pub result: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),

    Column(ColumnReference),

    // Binary operations
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    // Unary operations
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    Function(FunctionCall),

    SearchedCase(SearchedCase),

    // CASE operand WHEN value THEN result ... END
    SimpleCase {
        operand: Box<Expression>,
        when_clauses: Vec<WhenClause>,
        else_clause: Option<Box<Expression>>,
    },

    Cast {
        expression: Box<Expression>,
        data_type: String,
    },

    InList {
        expression: Box<Expression>,
        list: Vec<Expression>,
        negated: bool,
    },

    InSubquery {
        expression: Box<Expression>,
        subquery: Box<SelectStatement>,
        negated: bool,
    },

    Between {
        expression: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
        negated: bool,
    },

    Like {
        expression: Box<Expression>,
        pattern: Box<Expression>,
        escape: Option<Box<Expression>>,
        negated: bool,
    },

    IsNull {
        expression: Box<Expression>,
        negated: bool,
    },

    Exists {
        subquery: Box<SelectStatement>,
        negated: bool,
    },

    // Subquery producing a single value
    ScalarSubquery(Box<SelectStatement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Logical
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
}

impl NamedTableReference {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            alias: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Alias if present, else the base table name
    pub fn exposed_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

impl TableReference {
    pub fn named(table: NamedTableReference) -> Self {
        TableReference::Named(table)
    }

    pub fn derived(subquery: SelectStatement, alias: impl Into<String>) -> Self {
        TableReference::Derived {
            subquery: Box::new(subquery),
            alias: alias.into(),
        }
    }

    pub fn join(
        self,
        join_type: JoinType,
        right: TableReference,
        on: Option<Expression>,
    ) -> Self {
        TableReference::Join(Box::new(Join {
            join_type,
            left: self,
            right,
            on,
        }))
    }
}

impl ColumnReference {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Table qualifier: the second-from-last identifier of the chain
    pub fn qualifier(&self) -> Option<&str> {
        let len = self.identifiers.len();
        if len >= 2 {
            Some(&self.identifiers[len - 2])
        } else {
            None
        }
    }
}

impl SelectStatement {
    /// `SELECT * FROM <tables>`
    pub fn from_tables(from: Vec<TableReference>) -> Self {
        Self {
            projections: vec![SelectItem::AllColumns],
            from,
            ..Self::default()
        }
    }

    pub fn with_where(mut self, predicate: Expression) -> Self {
        self.where_clause = Some(predicate);
        self
    }
}

impl Expression {
    /// Create an unqualified column reference
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(ColumnReference::new([name.into()]))
    }

    /// Create a column reference from a dotted identifier chain
    pub fn qualified_column<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Column(ColumnReference::new(identifiers))
    }

    pub fn number(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::Number(value.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(FunctionCall {
            name: name.into(),
            args,
            distinct: false,
        })
    }

    pub fn scalar_subquery(subquery: SelectStatement) -> Self {
        Expression::ScalarSubquery(Box::new(subquery))
    }

    pub fn binary(self, op: BinaryOperator, other: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(other),
        }
    }

    /// Create an equality comparison
    pub fn eq(self, other: Expression) -> Self {
        self.binary(BinaryOperator::Equal, other)
    }

    /// Create a greater than comparison
    pub fn gt(self, other: Expression) -> Self {
        self.binary(BinaryOperator::Greater, other)
    }

    /// Create a less than comparison
    pub fn lt(self, other: Expression) -> Self {
        self.binary(BinaryOperator::Less, other)
    }

    /// Create an AND expression
    pub fn and(self, other: Expression) -> Self {
        self.binary(BinaryOperator::And, other)
    }

    /// Create an OR expression
    pub fn or(self, other: Expression) -> Self {
        self.binary(BinaryOperator::Or, other)
    }
}
