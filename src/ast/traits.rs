/*
*                    minipas -- front end for a small Pascal subset.
*
* program    = "program" ident ";" [ var_decl ] { procedure } "begin" commands "end" "." ;
* procedure  = "procedure" ident [ "(" params ")" ] ";" [ var_decl ] { procedure }
*              "begin" commands "end" ";" ;
* var_decl   = "var" ident_list ":" type ";" { ident_list ":" type ";" } ;
* params     = ident_list ":" type { ";" ident_list ":" type } ;
* commands   = command { ";" command } ;
* command    = ident ":=" expr
*            | ident [ "(" expr { "," expr } ")" ]
*            | "begin" commands "end"
*            | "if" expr "then" command [ "else" command ]
*            | "while" expr "do" command
*            | "for" ident ":=" expr ( "to" | "downto" ) expr "do" command ;
* expr       = simple_expr [ relop simple_expr ] ;
* simple_expr= [ "+" | "-" ] term { ( "+" | "-" | "or" ) term } ;
* term       = factor { ( "*" | "/" | "and" ) factor } ;
* factor     = int | real | "true" | "false" | "not" factor | "(" expr ")"
*            | ident [ "(" expr { "," expr } ")" ] ;
* relop      = "=" | "<>" | "<" | "<=" | ">" | ">=" ;
*/

use crate::frontend::token::Token;

/// Every node is anchored to the token that gives it a source position.
pub trait Spanned {
    fn anchor(&self) -> &Token;

    fn line(&self) -> usize {
        self.anchor().line
    }

    fn column(&self) -> usize {
        self.anchor().column
    }
}
