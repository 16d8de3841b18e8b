mod lex_good;
