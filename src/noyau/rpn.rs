// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), prête pour eval.rs
//
// Règles:
// - Nombres : sortie directe
// - Fonction(nom) : validée contre le registre, puis empilée ; la '(' qui suit
//   la remplace par un cadre d’appel (compteur d’arguments à 1)
// - Chaque '(' porte son cadre : Groupement ou Appel { nom, argc }
// - ',' incrémente le compteur du cadre d’appel ouvert
// - ')' ferme le cadre ; un cadre d’appel sort Appel { nom, argc }
//
// NOTE:
// - "f()" : une ')' collée à la '(' d’appel donne argc = 0, eval.rs refuse
//   ensuite proprement selon l’arité de f.

use super::erreurs::ErreurCalcul;
use super::fonctions;
use super::jetons::{Op, Tok};

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Postfixe {
    Nombre(f64),
    Op(Op),
    Appel { nom: String, argc: usize },
}

/// Cadre porté par une parenthèse ouvrante.
#[derive(Clone, Debug, PartialEq)]
enum Cadre {
    Groupement,
    Appel { nom: String, argc: usize },
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Clone, Debug, PartialEq)]
enum Pile {
    Op(Op),
    Fonction(String),
    Ouvrante(Cadre),
}

/// L’opérateur au sommet doit-il sortir avant `entrant` ?
fn doit_sortir(top: Op, entrant: Op) -> bool {
    if entrant.est_associatif_droite() {
        top.precedence() > entrant.precedence()
    } else {
        top.precedence() >= entrant.precedence()
    }
}

/// Sort les opérateurs du sommet (s’arrête sur '(' ou un marqueur).
fn vider_operateurs(ops: &mut Vec<Pile>, out: &mut Vec<Postfixe>) {
    while let Some(Pile::Op(op)) = ops.last() {
        out.push(Postfixe::Op(*op));
        ops.pop();
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction("max"), ParG, Nombre(1), Virgule, Nombre(2), ParD, Op(Fois), Nombre(3)]
///   rpn:    [Nombre(1), Nombre(2), Appel{max, 2}, Nombre(3), Op(Fois)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Postfixe>, ErreurCalcul> {
    let mut out: Vec<Postfixe> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // Sert à détecter l’appel vide "f()".
    let mut precedent: Option<&Tok> = None;

    for tok in tokens {
        match tok {
            Tok::Nombre(v) => out.push(Postfixe::Nombre(*v)),

            Tok::NombreMalforme(lit) => return Err(ErreurCalcul::NombreMalforme(lit.clone())),

            Tok::Fonction(nom) => {
                if !fonctions::existe(nom) {
                    return Err(ErreurCalcul::FonctionInconnue(nom.clone()));
                }
                ops.push(Pile::Fonction(nom.clone()));
            }

            Tok::Op(entrant) => {
                while let Some(Pile::Op(top)) = ops.last() {
                    if !doit_sortir(*top, *entrant) {
                        break;
                    }
                    out.push(Postfixe::Op(*top));
                    ops.pop();
                }
                ops.push(Pile::Op(*entrant));
            }

            Tok::ParG => {
                // si une fonction est au sommet, cette '(' ouvre sa liste d’arguments
                let cadre = match ops.pop() {
                    Some(Pile::Fonction(nom)) => Cadre::Appel { nom, argc: 1 },
                    Some(autre) => {
                        ops.push(autre);
                        Cadre::Groupement
                    }
                    None => Cadre::Groupement,
                };
                ops.push(Pile::Ouvrante(cadre));
            }

            Tok::Virgule => {
                vider_operateurs(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Ouvrante(Cadre::Appel { argc, .. })) => *argc += 1,
                    Some(Pile::Fonction(nom)) => {
                        return Err(ErreurCalcul::AppelSansParentheses(nom.clone()))
                    }
                    _ => return Err(ErreurCalcul::VirguleMalPlacee),
                }
            }

            Tok::ParD => {
                vider_operateurs(&mut ops, &mut out);
                match ops.pop() {
                    Some(Pile::Ouvrante(Cadre::Groupement)) => {}
                    Some(Pile::Ouvrante(Cadre::Appel { nom, argc })) => {
                        let argc = if precedent == Some(&Tok::ParG) { 0 } else { argc };
                        out.push(Postfixe::Appel { nom, argc });
                    }
                    Some(Pile::Fonction(nom)) => {
                        return Err(ErreurCalcul::AppelSansParentheses(nom))
                    }
                    // Op impossible ici : vider_operateurs s’arrête avant
                    Some(Pile::Op(_)) | None => {
                        return Err(ErreurCalcul::ParenthesesDesequilibrees)
                    }
                }
            }
        }
        precedent = Some(tok);
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            Pile::Op(op) => out.push(Postfixe::Op(op)),
            Pile::Ouvrante(_) => return Err(ErreurCalcul::ParenthesesDesequilibrees),
            Pile::Fonction(nom) => return Err(ErreurCalcul::AppelSansParentheses(nom)),
        }
    }

    Ok(out)
}
