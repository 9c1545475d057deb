//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile numérique -> scalaire
//!
//! Les quatre opérations de base passent par le fournisseur `Arithmetique`
//! injecté ; `^` et les fonctions du registre sont calculés ici.

use super::arith::{Arithmetique, Calculatrice};
use super::erreurs::{ErreurCalcul, ErreurFournisseur};
use super::fonctions;
use super::format::format_postfixe;
use super::jetons::{format_tokens, tokenize, Op};
use super::rpn::{to_rpn, Postfixe};

/// Trace textuelle du pipeline (panneau « Démarche » de l’UI).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// Point d’entrée : sans état entre deux appels, hormis le fournisseur.
#[derive(Clone, Debug, Default)]
pub struct Evaluateur<A: Arithmetique = Calculatrice> {
    arith: A,
}

impl<A: Arithmetique> Evaluateur<A> {
    pub fn new(arith: A) -> Self {
        Self { arith }
    }

    /// Évalue une expression infixe en f64.
    pub fn evaluer(&self, expression: &str) -> Result<f64, ErreurCalcul> {
        self.evaluer_avec_demarche(expression).map(|(v, _)| v)
    }

    /// Comme `evaluer`, en gardant les jetons et la RPN sous forme texte.
    pub fn evaluer_avec_demarche(
        &self,
        expression: &str,
    ) -> Result<(f64, Demarche), ErreurCalcul> {
        if expression.trim().is_empty() {
            return Err(ErreurCalcul::EntreeVide);
        }

        // 1) Jetons
        let jetons = tokenize(expression)?;
        let jetons_txt = format_tokens(&jetons);
        log::trace!("jetons: {jetons_txt}");

        // 2) RPN
        let rpn = to_rpn(&jetons)?;
        let rpn_txt = format_postfixe(&rpn);
        log::trace!("rpn: {rpn_txt}");

        // 3) Pile
        let v = eval_rpn(&rpn, &self.arith)?;
        log::debug!("{expression:?} = {v}");

        Ok((
            v,
            Demarche {
                jetons: jetons_txt,
                rpn: rpn_txt,
            },
        ))
    }
}

/// API publique minimale : fournisseur par défaut.
pub fn eval_expression(expression: &str) -> Result<f64, ErreurCalcul> {
    Evaluateur::new(Calculatrice).evaluer(expression)
}

/// Enveloppe l’erreur du fournisseur sans la réécrire.
fn fournisseur<E: std::error::Error + Send + Sync + 'static>(e: E) -> ErreurCalcul {
    ErreurCalcul::Arithmetique(ErreurFournisseur::new(e))
}

fn depiler(st: &mut Vec<f64>) -> Result<f64, ErreurCalcul> {
    st.pop().ok_or(ErreurCalcul::ExpressionInvalide)
}

/// Évalue une RPN sur une pile de f64.
pub fn eval_rpn<A: Arithmetique + ?Sized>(
    rpn: &[Postfixe],
    arith: &A,
) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::new();

    for p in rpn {
        match p {
            Postfixe::Nombre(v) => st.push(*v),

            Postfixe::Op(op) => {
                // premier dépilé = opérande droit (ou unique pour un unaire)
                let b = depiler(&mut st)?;
                let r = match op {
                    Op::MoinsUnaire => -b,
                    Op::PlusUnaire => b,
                    Op::Plus => arith.add(depiler(&mut st)?, b).map_err(fournisseur)?,
                    Op::Moins => arith.sub(depiler(&mut st)?, b).map_err(fournisseur)?,
                    Op::Fois => arith.mul(depiler(&mut st)?, b).map_err(fournisseur)?,
                    Op::Divise => arith.div(depiler(&mut st)?, b).map_err(fournisseur)?,
                    Op::Puissance => depiler(&mut st)?.powf(b),
                };
                st.push(r);
            }

            Postfixe::Appel { nom, argc } => {
                let f = fonctions::trouver(nom)
                    .ok_or_else(|| ErreurCalcul::FonctionInconnue(nom.clone()))?;

                let argc = *argc;
                if argc < f.arite.min {
                    return Err(ErreurCalcul::ArgumentsInsuffisants {
                        nom: f.nom.to_string(),
                        attendus: f.arite.min,
                        fournis: argc,
                    });
                }
                if let Some(max) = f.arite.max {
                    if argc > max {
                        return Err(ErreurCalcul::ArgumentsEnTrop {
                            nom: f.nom.to_string(),
                            max,
                            fournis: argc,
                        });
                    }
                }
                // argument vide ("max(1,)") : la pile n’a pas de quoi servir argc
                if st.len() < argc {
                    return Err(ErreurCalcul::ArgumentsInsuffisants {
                        nom: f.nom.to_string(),
                        attendus: argc,
                        fournis: st.len(),
                    });
                }

                // split_off garde l’ordre gauche -> droite
                let args = st.split_off(st.len() - argc);
                st.push((f.f)(&args));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    depiler(&mut st)
}
