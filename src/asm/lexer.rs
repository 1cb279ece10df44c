use logos::Logos;

/// Tokens of one line of assembly. Mnemonics are case-insensitive; register
/// names are not, so `GP0` falls through to `Ident` and is rejected later as
/// an unknown register.
#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[token("hlt", ignore(ascii_case))]
    Hlt,
    #[token("nop", ignore(ascii_case))]
    Nop,
    #[token("cmp", ignore(ascii_case))]
    Cmp,
    #[token("add", ignore(ascii_case))]
    Add,
    #[token("sub", ignore(ascii_case))]
    Sub,
    #[token("mul", ignore(ascii_case))]
    Mul,
    #[token("div", ignore(ascii_case))]
    Div,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("xor", ignore(ascii_case))]
    Xor,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("jmp", ignore(ascii_case))]
    Jmp,
    #[token("jeq", ignore(ascii_case))]
    Jeq,
    #[token("jlt", ignore(ascii_case))]
    Jlt,
    #[token("jle", ignore(ascii_case))]
    Jle,
    #[token("jgt", ignore(ascii_case))]
    Jgt,
    #[token("jge", ignore(ascii_case))]
    Jge,
    #[token("mov", ignore(ascii_case))]
    Mov,
    #[token("sto", ignore(ascii_case))]
    Sto,
    #[token("ior", ignore(ascii_case))]
    Ior,
    #[token("iow", ignore(ascii_case))]
    Iow,

    #[regex("gp[0-9]+")]
    Register,
    #[regex("0x[0-9a-fA-F]+")]
    HexLiteral,
    #[regex("-?[0-9]+")]
    IntLiteral,
    #[token(",")]
    Comma,
    #[regex(r"[ \t]+")]
    Whitespace,
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[error]
    Error,
}
