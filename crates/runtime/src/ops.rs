//! Operator table
//!
//! Maps operator characters to [`Op`]. The base table is the language as
//! defined by FALSE 1.2 (plus the portable interpreter's `O` and `B`
//! spellings of `ø` and `ß`); the extended table is only consulted when the
//! host enables extensions.
//!
//! [`Op::symbol`] is an exhaustive match, so an `Op` without a spelling does
//! not compile; the tests check that every spelling looks up to its `Op`.
//!
//! ```text
//!      Stack diagram                 Token  Description
//!      (          num -- )           .      print number
//!      (           ch -- )           ,      print character
//!      (              -- ch )        ^      read character
//!      (              -- )           ß B    flush
//!      (        x var -- )           :      assign
//!      (          var -- x )         ;      dereference
//!      (         func -- )           !      call
//!      (            x -- -x )        _      negate
//!      (          x y -- r )         + - * / & |
//!  Ext (  numer denom -- rem quot )  ÷      /MOD
//!      (          x y -- bool )      = >
//!  Ext (          x y -- bool )      ≠ < ≤ ≥
//!      (            x -- ~x )        ~
//!  Ext (          x y -- r )         ⊻ « »
//!  Ext (         bool -- )           ∫      assert
//!  Ext (              -- n )         §      depth
//!      (            a -- a a )       $      dup
//!      (            a -- )           %      drop
//!      (          a b -- b a )       \      swap
//!      (        a b c -- b c a )     @      rot
//!  Ext (          a b -- a b a )     £      over
//!  Ext (          a b -- b )         ‰      nip
//!  Ext (          a b -- b a b )     €      tuck
//!  Ext (          a b -- a b a b )   Ø      2dup
//!  Ext (        ... n -- ... )       ™      roll
//!  Ext (          ... -- ... )       ®      reverse
//!      (        ... u -- ... xu )    ø O    pick
//!      (    bool func -- )           ?      if
//!  Ext (bool func func -- )          ¿      if-else
//!      (    func func -- )           #      while
//! ```

/// Every operator the evaluator executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Control (recurse into the evaluator)
    Call,
    If,
    IfElse,
    While,

    // Stack
    Dup,
    Drop,
    Swap,
    Rot,
    Pick,
    Over,
    Nip,
    Tuck,
    TwoDup,
    Depth,
    Reverse,
    Roll,

    // Arithmetic and logic
    Add,
    Subtract,
    Multiply,
    Divide,
    DivMod,
    Negate,
    And,
    Or,
    Xor,
    Not,
    ShiftLeft,
    ShiftRight,

    // Comparison
    Equal,
    NotEqual,
    Greater,
    Less,
    LessEqual,
    GreaterEqual,
    Assert,

    // Variables
    Store,
    Fetch,

    // I/O
    Read,
    PrintNumber,
    PrintChar,
    Flush,

    /// `` ` ``: reserved for inline machine code, always an error
    Inject,
}

impl Op {
    pub const ALL: [Op; 42] = [
        Op::Call,
        Op::If,
        Op::IfElse,
        Op::While,
        Op::Dup,
        Op::Drop,
        Op::Swap,
        Op::Rot,
        Op::Pick,
        Op::Over,
        Op::Nip,
        Op::Tuck,
        Op::TwoDup,
        Op::Depth,
        Op::Reverse,
        Op::Roll,
        Op::Add,
        Op::Subtract,
        Op::Multiply,
        Op::Divide,
        Op::DivMod,
        Op::Negate,
        Op::And,
        Op::Or,
        Op::Xor,
        Op::Not,
        Op::ShiftLeft,
        Op::ShiftRight,
        Op::Equal,
        Op::NotEqual,
        Op::Greater,
        Op::Less,
        Op::LessEqual,
        Op::GreaterEqual,
        Op::Assert,
        Op::Store,
        Op::Fetch,
        Op::Read,
        Op::PrintNumber,
        Op::PrintChar,
        Op::Flush,
        Op::Inject,
    ];

    /// Look `c` up in the base table, then in the extended table if enabled
    pub fn lookup(c: char, extensions: bool) -> Option<Op> {
        Op::base(c).or_else(|| if extensions { Op::extended(c) } else { None })
    }

    fn base(c: char) -> Option<Op> {
        let op = match c {
            '!' => Op::Call,
            '?' => Op::If,
            '#' => Op::While,
            '$' => Op::Dup,
            '%' => Op::Drop,
            '\\' => Op::Swap,
            '@' => Op::Rot,
            'ø' | 'O' => Op::Pick,
            '+' => Op::Add,
            '-' => Op::Subtract,
            '*' => Op::Multiply,
            '/' => Op::Divide,
            '_' => Op::Negate,
            '&' => Op::And,
            '|' => Op::Or,
            '~' => Op::Not,
            '=' => Op::Equal,
            '>' => Op::Greater,
            ':' => Op::Store,
            ';' => Op::Fetch,
            '^' => Op::Read,
            '.' => Op::PrintNumber,
            ',' => Op::PrintChar,
            'ß' | 'B' => Op::Flush,
            '`' => Op::Inject,
            _ => return None,
        };
        Some(op)
    }

    fn extended(c: char) -> Option<Op> {
        let op = match c {
            '¿' => Op::IfElse,
            '£' => Op::Over,
            '‰' => Op::Nip,
            '€' => Op::Tuck,
            'Ø' => Op::TwoDup,
            '§' => Op::Depth,
            '®' => Op::Reverse,
            '™' => Op::Roll,
            '÷' => Op::DivMod,
            '⊻' => Op::Xor,
            '«' => Op::ShiftLeft,
            '»' => Op::ShiftRight,
            '≠' => Op::NotEqual,
            '<' => Op::Less,
            '≤' => Op::LessEqual,
            '≥' => Op::GreaterEqual,
            '∫' => Op::Assert,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical spelling of the operator
    pub const fn symbol(self) -> char {
        match self {
            Op::Call => '!',
            Op::If => '?',
            Op::IfElse => '¿',
            Op::While => '#',
            Op::Dup => '$',
            Op::Drop => '%',
            Op::Swap => '\\',
            Op::Rot => '@',
            Op::Pick => 'ø',
            Op::Over => '£',
            Op::Nip => '‰',
            Op::Tuck => '€',
            Op::TwoDup => 'Ø',
            Op::Depth => '§',
            Op::Reverse => '®',
            Op::Roll => '™',
            Op::Add => '+',
            Op::Subtract => '-',
            Op::Multiply => '*',
            Op::Divide => '/',
            Op::DivMod => '÷',
            Op::Negate => '_',
            Op::And => '&',
            Op::Or => '|',
            Op::Xor => '⊻',
            Op::Not => '~',
            Op::ShiftLeft => '«',
            Op::ShiftRight => '»',
            Op::Equal => '=',
            Op::NotEqual => '≠',
            Op::Greater => '>',
            Op::Less => '<',
            Op::LessEqual => '≤',
            Op::GreaterEqual => '≥',
            Op::Assert => '∫',
            Op::Store => ':',
            Op::Fetch => ';',
            Op::Read => '^',
            Op::PrintNumber => '.',
            Op::PrintChar => ',',
            Op::Flush => 'ß',
            Op::Inject => '`',
        }
    }

    /// True for operators that need the extensions flag
    pub const fn is_extension(self) -> bool {
        matches!(
            self,
            Op::IfElse
                | Op::Over
                | Op::Nip
                | Op::Tuck
                | Op::TwoDup
                | Op::Depth
                | Op::Reverse
                | Op::Roll
                | Op::DivMod
                | Op::Xor
                | Op::ShiftLeft
                | Op::ShiftRight
                | Op::NotEqual
                | Op::Less
                | Op::LessEqual
                | Op::GreaterEqual
                | Op::Assert
        )
    }
}
