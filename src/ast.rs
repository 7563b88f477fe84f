use crate::expr::Expr;
use crate::stmt::Stmt;

/// Renders the name and children in parenthesized prefix form.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$self.print_expr($x);
            )*
            string += ")";

            string
        }
    };
}

/// Debugging aid that renders the AST in parenthesized prefix form, making
/// precedence and desugaring visible. Not part of the interpretation
/// pipeline.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.to_string(),
            Expr::Unary(unary) => parenthesize!(self, &unary.operator.lexeme, &unary.expr),
            Expr::Binary(binary) => parenthesize!(self, &binary.operator.lexeme, &binary.left, &binary.right),
            Expr::Grouping(grouping) => parenthesize!(self, "group", &grouping.expr),
            Expr::Variable(variable) => variable.name.lexeme.clone(),
            Expr::Assign(assign) => parenthesize!(self, &format!("= {}", assign.name.lexeme), &assign.value),
            Expr::Logical(logical) => parenthesize!(self, &logical.operator.lexeme, &logical.left, &logical.right),
            Expr::Call(call) => {
                let mut string = String::new();
                string += "(call ";
                string += &self.print_expr(&call.callee);
                for argument in &call.arguments {
                    string += " ";
                    string += &self.print_expr(argument);
                }
                string += ")";
                string
            },
            Expr::Get(get) => format!("(. {} {})", self.print_expr(&get.object), get.name.lexeme),
            Expr::Set(set) => format!(
                "(= (. {} {}) {})",
                self.print_expr(&set.object),
                set.name.lexeme,
                self.print_expr(&set.value),
            ),
            Expr::This(_) => String::from("this"),
            Expr::Super(super_expr) => format!("(super {})", super_expr.method.lexeme),
        }
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(data) => format!("(expr {})", self.print_expr(&data.expr)),
            Stmt::Print(data) => format!("(print {})", self.print_expr(&data.expr)),
            Stmt::Var(data) => match &data.initializer {
                Some(initializer) => format!("(var {} = {})", data.name.lexeme, self.print_expr(initializer)),
                None => format!("(var {})", data.name.lexeme),
            },
            Stmt::Block(data) => {
                let mut string = String::new();
                string += "{";
                for stmt in &data.statements {
                    string += " ";
                    string += &self.print_stmt(stmt);
                }
                string += " }";
                string
            },
            Stmt::If(data) => {
                let mut string = String::new();
                string += "(if ";
                string += &self.print_expr(&data.condition);
                string += " ";
                string += &self.print_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    string += " else ";
                    string += &self.print_stmt(else_branch);
                }
                string += ")";
                string
            },
            Stmt::While(data) => format!(
                "(while {} {})",
                self.print_expr(&data.condition),
                self.print_stmt(&data.body),
            ),
            Stmt::Function(data) => {
                let params = data.params.iter()
                    .map(|param| param.lexeme.clone())
                    .collect::<Vec<String>>()
                    .join(" ");
                let body = data.body.iter()
                    .map(|stmt| self.print_stmt(stmt))
                    .collect::<Vec<String>>()
                    .join(" ");

                format!("(fun {}({params}) {{ {body} }})", data.name.lexeme)
            },
            Stmt::Return(data) => match &data.value {
                Some(value) => format!("(return {})", self.print_expr(value)),
                None => String::from("(return)"),
            },
            Stmt::Class(data) => {
                let mut string = String::new();
                string += "(class ";
                string += &data.name.lexeme;
                if let Some(superclass) = &data.superclass {
                    string += " < ";
                    string += &superclass.name.lexeme;
                }
                for method in &data.methods {
                    string += " ";
                    string += &self.print_stmt(&Stmt::Function(method.clone()));
                }
                string += ")";
                string
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::{BinaryData, GroupingData, UnaryData};
    use crate::literal::Literal;
    use crate::token::{Token, Type};

    #[test]
    fn prints_nested_expression() {
        // -123 * (45.67)
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Unary(UnaryData {
                operator: Token::new(Type::Minus, String::from("-"), None, 1),
                expr: Box::new(Expr::Literal(Literal::Number(123.0))),
            })),
            operator: Token::new(Type::Star, String::from("*"), None, 1),
            right: Box::new(Expr::Grouping(GroupingData {
                expr: Box::new(Expr::Literal(Literal::Number(45.67))),
            })),
        });

        assert_eq!(AstPrinter.print_expr(&expr), "(* (- 123) (group 45.67))");
    }
}
