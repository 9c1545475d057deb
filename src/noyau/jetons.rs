// src/noyau/jetons.rs

use std::f64::consts::{E, PI};

use super::erreurs::ErreurCalcul;
use super::format::format_nombre;

/// Opérateurs (binaires + marqueurs unaires synthétisés par le tokenizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    MoinsUnaire,
    PlusUnaire,
}

impl Op {
    pub fn precedence(self) -> u8 {
        match self {
            Op::MoinsUnaire | Op::PlusUnaire => 4,
            Op::Puissance => 3,
            Op::Fois | Op::Divise => 2,
            Op::Plus | Op::Moins => 1,
        }
    }

    pub fn est_associatif_droite(self) -> bool {
        matches!(self, Op::Puissance | Op::MoinsUnaire | Op::PlusUnaire)
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Moins => "-",
            Op::Fois => "*",
            Op::Divise => "/",
            Op::Puissance => "^",
            Op::MoinsUnaire => "u-",
            Op::PlusUnaire => "u+",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Nombre(f64),
    // Littéral qui ne se lit pas en f64 ("1.2.3", ".") : refusé par rpn.rs, pas ici.
    NombreMalforme(String),

    Op(Op),

    // Marqueur de fonction : seulement si l’identifiant est collé à '('
    Fonction(String),

    ParG,
    ParD,
    Virgule,
}

fn est_debut_ident(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn est_suite_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Un '+'/'-' est unaire quand aucun opérande ne peut exister à sa gauche.
fn attend_operande(out: &[Tok]) -> bool {
    matches!(
        out.last(),
        None | Some(Tok::ParG) | Some(Tok::Virgule) | Some(Tok::Op(_))
    )
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .5), lecture invariante ('.' seulement)
/// - opérateurs + - * / ^ (et × ÷ normalisés)
/// - parenthèses ( ) et virgule
/// - constantes pi (ou π) et e, insensibles à la casse
/// - appels de fonction nom(...)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let chars: Vec<char> = s
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            autre => autre,
        })
        .collect();

    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffres et points, avalés sans validation
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();
            match lit.parse::<f64>() {
                Ok(v) => out.push(Tok::Nombre(v)),
                Err(_) => out.push(Tok::NombreMalforme(lit)),
            }
            continue;
        }

        // Identifiants : constantes ou fonctions
        if est_debut_ident(c) {
            let start = i;
            i += 1;
            while i < chars.len() && est_suite_ident(chars[i]) {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();

            if ident.eq_ignore_ascii_case("pi") || ident == "π" {
                out.push(Tok::Nombre(PI));
                continue;
            }
            if ident.eq_ignore_ascii_case("e") {
                out.push(Tok::Nombre(E));
                continue;
            }
            if i < chars.len() && chars[i] == '(' {
                out.push(Tok::Fonction(ident));
                continue;
            }
            return Err(ErreurCalcul::IdentifiantInconnu(ident));
        }

        match c {
            ',' => out.push(Tok::Virgule),
            '(' => out.push(Tok::ParG),
            ')' => out.push(Tok::ParD),
            '+' | '-' if attend_operande(&out) => {
                out.push(Tok::Op(if c == '-' {
                    Op::MoinsUnaire
                } else {
                    Op::PlusUnaire
                }));
            }
            '+' => out.push(Tok::Op(Op::Plus)),
            '-' => out.push(Tok::Op(Op::Moins)),
            '*' => out.push(Tok::Op(Op::Fois)),
            '/' => out.push(Tok::Op(Op::Divise)),
            '^' => out.push(Tok::Op(Op::Puissance)),
            _ => {
                return Err(ErreurCalcul::CaractereInattendu {
                    car: c,
                    position: i,
                })
            }
        }
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Nombre(v) => format_nombre(*v),
            Tok::NombreMalforme(lit) => lit.clone(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::Fonction(nom) => format!("{nom}:"),
            Tok::ParG => "(".to_string(),
            Tok::ParD => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
