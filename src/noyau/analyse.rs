// src/noyau/analyse.rs
//
// Descente récursive -> Expr
//
// Grammaire:
//   expr    := terme (('+'|'-') terme)*
//   terme   := facteur (('×'|'÷') facteur)*
//   facteur := nombre | '(' expr ')'
//
// Associatif à gauche, × ÷ plus prioritaires que + −.
// Les jetons sont tirés à la demande (un seul jeton d’avance).

use std::iter::Peekable;

use super::erreur::ErreurAnalyse;
use super::expr::{Expr, Op};
use super::jetons::{tokenize, Genre, Jeton, Jetons};

pub fn parse_expression(texte: &str) -> Result<Expr, ErreurAnalyse> {
    if texte.trim().is_empty() {
        return Err(ErreurAnalyse::at(texte, 0, "expression vide"));
    }

    let mut a = Analyseur {
        texte,
        jetons: tokenize(texte).peekable(),
    };
    let e = a.expr()?;

    // tout doit être consommé
    match a.suivant()? {
        None => Ok(e),
        Some(j) if j.genre == Genre::ParD => {
            Err(a.erreur(j.position, "parenthèse fermante sans ouvrante"))
        }
        Some(j) => Err(a.erreur(j.position, format!("jeton en trop: {:?}", j.lexeme))),
    }
}

struct Analyseur<'a> {
    texte: &'a str,
    jetons: Peekable<Jetons<'a>>,
}

impl<'a> Analyseur<'a> {
    fn erreur(&self, position: usize, raison: impl Into<String>) -> ErreurAnalyse {
        ErreurAnalyse::at(self.texte, position, raison)
    }

    fn regarde(&mut self) -> Result<Option<&Genre>, ErreurAnalyse> {
        match self.jetons.peek() {
            None => Ok(None),
            Some(Ok(j)) => Ok(Some(&j.genre)),
            Some(Err(e)) => Err(e.clone()),
        }
    }

    fn suivant(&mut self) -> Result<Option<Jeton<'a>>, ErreurAnalyse> {
        self.jetons.next().transpose()
    }

    fn expr(&mut self) -> Result<Expr, ErreurAnalyse> {
        let mut gauche = self.terme()?;
        loop {
            let op = match self.regarde()? {
                Some(Genre::Plus) => Op::Plus,
                Some(Genre::Moins) => Op::Moins,
                _ => break,
            };
            self.suivant()?;
            let droite = self.terme()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn terme(&mut self) -> Result<Expr, ErreurAnalyse> {
        let mut gauche = self.facteur()?;
        loop {
            let op = match self.regarde()? {
                Some(Genre::Fois) => Op::Fois,
                Some(Genre::Divise) => Op::Divise,
                _ => break,
            };
            self.suivant()?;
            let droite = self.facteur()?;
            gauche = Expr::binaire(op, gauche, droite);
        }
        Ok(gauche)
    }

    fn facteur(&mut self) -> Result<Expr, ErreurAnalyse> {
        let fin = self.texte.len();
        match self.suivant()? {
            Some(Jeton {
                genre: Genre::Nombre(r),
                ..
            }) => Ok(Expr::Nombre(r)),

            Some(Jeton {
                genre: Genre::ParG,
                position: ouvrante,
                ..
            }) => {
                let e = self.expr()?;
                match self.suivant()? {
                    Some(Jeton {
                        genre: Genre::ParD, ..
                    }) => Ok(e),
                    Some(j) => Err(self.erreur(
                        j.position,
                        format!("')' attendue (ouverte en {ouvrante}), trouvé {:?}", j.lexeme),
                    )),
                    None => Err(self.erreur(fin, format!("parenthèse ouverte en {ouvrante} non fermée"))),
                }
            }

            Some(j) => Err(self.erreur(
                j.position,
                format!("nombre ou '(' attendu, trouvé {:?}", j.lexeme),
            )),

            None => Err(self.erreur(fin, "fin d’expression inattendue")),
        }
    }
}
