// Constants for the interpreter

/// Characters skipped at dispatch positions
pub const WHITESPACE: [char; 3] = [' ', '\t', '\n'];

/// Opens a string literal
pub const STRING_OPEN: char = '\'';

/// Closes a string literal
pub const STRING_CLOSE: char = ':';

pub const ESCAPE: char = '\\';

/// Stands for the working register wherever a number or slot is expected
pub const REGISTER_MARKER: char = 'w';

/// Operators that may stand in for an operand of a loop condition
pub const CONDITION_OPERATORS: [char; 5] = ['.', 'w', 's', '<', 'v'];

/// Modifier introducing a resource redirect for `!` and `.`
pub const REDIRECT: char = '&';

/// Filename that makes `&` open a one-shot TCP listener instead of a file
pub const SOCKET_SENTINEL: &str = "__SOCKET";

/// Maximum number of bytes a socket read returns
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Default snapshot memory limit used by the debugger (1 GB)
pub const DEFAULT_HISTORY_LIMIT: usize = 1024 * 1024 * 1024;

/// Exit status of a top-level run that hit a fatal error
pub const EXIT_FAILURE: i32 = 1;
