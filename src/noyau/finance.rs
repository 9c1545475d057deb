//! Fonctions financières (valeur temps de l’argent), conventions tableur :
//! - `taux` : taux par période (fraction), `nper` : nombre de périodes
//! - `type_` : 0 = paiements en fin de période, autre = début de période
//! - signes : sorties d’argent négatives, entrées positives
//!
//! Pour un taux quasi nul (|taux| < 1e-12) on passe à la limite linéaire,
//! la forme générale divisant par ((1+taux)^n − 1) ou par taux.

/// Seuil sous lequel le taux est traité comme nul.
pub const TAUX_NUL: f64 = 1e-12;

fn taux_nul(taux: f64) -> bool {
    taux.abs() < TAUX_NUL
}

/// Versement périodique constant amortissant `pv` vers `fv` en `nper` périodes.
pub fn pmt(taux: f64, nper: f64, pv: f64, fv: f64, type_: f64) -> f64 {
    if taux_nul(taux) {
        return -(pv + fv) / nper;
    }
    let r1 = (1.0 + taux).powf(nper);
    -(taux * (pv * r1 + fv)) / ((1.0 + taux * type_) * (r1 - 1.0))
}

/// Valeur future.
pub fn fv(taux: f64, nper: f64, pmt: f64, pv: f64, type_: f64) -> f64 {
    if taux_nul(taux) {
        return -(pv + pmt * nper);
    }
    let r1 = (1.0 + taux).powf(nper);
    -(pv * r1 + pmt * (1.0 + taux * type_) * (r1 - 1.0) / taux)
}

/// Valeur actuelle.
pub fn pv(taux: f64, nper: f64, pmt: f64, fv: f64, type_: f64) -> f64 {
    if taux_nul(taux) {
        return -(fv + pmt * nper);
    }
    let r1 = (1.0 + taux).powf(nper);
    -(fv + pmt * (1.0 + taux * type_) * (r1 - 1.0) / taux) / r1
}

/// Nombre de périodes.
pub fn nper(taux: f64, pmt: f64, pv: f64, fv: f64, type_: f64) -> f64 {
    if taux_nul(taux) {
        return -(pv + fv) / pmt;
    }
    let p = pmt * (1.0 + taux * type_);
    ((p - fv * taux) / (p + pv * taux)).ln() / (1.0 + taux).ln()
}
