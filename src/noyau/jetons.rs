// src/noyau/jetons.rs
//
// Tokenisation paresseuse : on ne découpe que ce que l’analyseur consomme.
// Chaque jeton garde son lexème (tranche de la source) et sa position (octets).
//
// Reconnu:
// - nombres en notation des fichiers, sans espaces : 12, 3/4, 2'3/4
// - opérateurs + - × ÷ (et * comme alias de ×)
// - parenthèses ( )
// Le '/' seul n’est PAS un opérateur : il n’existe qu’à l’intérieur d’un nombre.

use super::erreur::ErreurAnalyse;
use super::format::parse_rational;
use super::rationnel::Rationnel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Genre {
    Nombre(Rationnel),
    Plus,
    Moins,
    Fois,
    Divise,
    ParG,
    ParD,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton<'a> {
    pub genre: Genre,
    pub lexeme: &'a str,
    pub position: usize,
}

/// Suite finie de jetons ; `Clone` ou `restart()` pour la relire depuis le début.
/// Après une erreur, la suite est terminée.
#[derive(Clone, Debug)]
pub struct Jetons<'a> {
    source: &'a str,
    pos: usize,
}

pub fn tokenize(source: &str) -> Jetons<'_> {
    Jetons { source, pos: 0 }
}

impl<'a> Jetons<'a> {
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    fn jeton(&mut self, genre: Genre, debut: usize, fin: usize) -> Jeton<'a> {
        let source = self.source;
        self.pos = fin;
        Jeton {
            genre,
            lexeme: &source[debut..fin],
            position: debut,
        }
    }

    fn erreur(&mut self, position: usize, raison: String) -> ErreurAnalyse {
        self.pos = self.source.len();
        ErreurAnalyse::at(self.source, position, raison)
    }

    /// Fin (exclue) de la suite de chiffres commençant à `i`.
    fn fin_chiffres(&self, i: usize) -> usize {
        let source = self.source;
        let reste = &source[i..];
        i + reste
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(reste.len())
    }

    /// Nombre littéral : D+ ( '/' D+ | '\'' D+ '/' D+ )?
    fn nombre(&mut self, debut: usize) -> Result<Jeton<'a>, ErreurAnalyse> {
        let source = self.source;
        let octets = source.as_bytes();
        let mut i = self.fin_chiffres(debut);

        match octets.get(i) {
            Some(b'/') => {
                let j = self.fin_chiffres(i + 1);
                if j == i + 1 {
                    return Err(self.erreur(i, "dénominateur attendu après '/'".into()));
                }
                i = j;
            }
            Some(b'\'') => {
                let j = self.fin_chiffres(i + 1);
                if j == i + 1 || octets.get(j) != Some(&b'/') {
                    return Err(self.erreur(i, "fraction attendue après l’apostrophe".into()));
                }
                let k = self.fin_chiffres(j + 1);
                if k == j + 1 {
                    return Err(self.erreur(j, "dénominateur attendu après '/'".into()));
                }
                i = k;
            }
            _ => {}
        }

        let lexeme = &source[debut..i];
        match parse_rational(lexeme) {
            Ok(r) => Ok(self.jeton(Genre::Nombre(r), debut, i)),
            Err(e) => Err(self.erreur(debut, e.raison)),
        }
    }
}

impl<'a> Iterator for Jetons<'a> {
    type Item = Result<Jeton<'a>, ErreurAnalyse>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let reste = &source[self.pos..];
        let blancs = reste.len() - reste.trim_start().len();
        let debut = self.pos + blancs;

        let c = source[debut..].chars().next()?;
        let fin = debut + c.len_utf8();

        let genre = match c {
            '+' => Genre::Plus,
            '-' => Genre::Moins,
            '×' | '*' => Genre::Fois,
            '÷' => Genre::Divise,
            '(' => Genre::ParG,
            ')' => Genre::ParD,
            c if c.is_ascii_digit() => return Some(self.nombre(debut)),
            _ => return Some(Err(self.erreur(debut, format!("caractère inattendu: '{c}'")))),
        };

        Some(Ok(self.jeton(genre, debut, fin)))
    }
}
