//! src/app/historique.rs
//!
//! Historique des calculs (en mémoire).
//!
//! Contrats :
//! - Une seule entrée par expression (égalité exacte) : réévaluer met à jour
//!   le résultat, incrémente le compteur d’usage et rafraîchit la date d’usage.
//! - Ordre d’affichage : les 5 plus utilisées d’abord (usage ↓, dernier usage ↓, id ↓),
//!   puis le reste par expression (insensible à la casse).
//! - Les « dates » sont des tics monotones (déterministes, sans horloge système).

use std::cmp::Ordering;

/// Nombre d’entrées « favorites » placées en tête de liste.
pub const NB_FAVORIS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entree {
    pub id: u64,
    pub expression: String,
    pub resultat: String,
    pub creee: u64,
    pub derniere: u64,
    pub usages: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: Vec<Entree>,
    prochain_id: u64,
    horloge: u64,
}

/// usage ↓, dernier usage ↓, id ↓
fn par_usage(a: &Entree, b: &Entree) -> Ordering {
    b.usages
        .cmp(&a.usages)
        .then(b.derniere.cmp(&a.derniere))
        .then(b.id.cmp(&a.id))
}

fn par_expression(a: &Entree, b: &Entree) -> Ordering {
    a.expression
        .to_lowercase()
        .cmp(&b.expression.to_lowercase())
        .then(a.id.cmp(&b.id))
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    fn tic(&mut self) -> u64 {
        self.horloge += 1;
        self.horloge
    }

    /// Ajoute (ou réutilise) une expression évaluée.
    pub fn ajouter(&mut self, expression: &str, resultat: &str) {
        let maintenant = self.tic();

        if let Some(e) = self.entrees.iter_mut().find(|e| e.expression == expression) {
            e.resultat = resultat.to_string();
            e.usages += 1;
            e.derniere = maintenant;
            return;
        }

        self.prochain_id += 1;
        self.entrees.push(Entree {
            id: self.prochain_id,
            expression: expression.to_string(),
            resultat: resultat.to_string(),
            creee: maintenant,
            derniere: maintenant,
            usages: 1,
        });
    }

    /// Ordre d’affichage complet (favoris puis alphabétique).
    fn ordonnees(&self) -> Vec<&Entree> {
        let mut toutes: Vec<&Entree> = self.entrees.iter().collect();
        toutes.sort_by(|a, b| par_usage(a, b));

        let reste_debut = toutes.len().min(NB_FAVORIS);
        toutes[reste_debut..].sort_by(|a, b| par_expression(a, b));
        toutes
    }

    /// Les `limite` premières entrées dans l’ordre d’affichage.
    pub fn liste(&self, limite: usize) -> Vec<Entree> {
        self.ordonnees()
            .into_iter()
            .take(limite)
            .cloned()
            .collect()
    }

    /// Ne garde que les `garder` premières entrées de l’ordre d’affichage.
    pub fn tronquer(&mut self, garder: usize) {
        if self.entrees.len() <= garder {
            return;
        }
        let ids: Vec<u64> = self
            .ordonnees()
            .into_iter()
            .take(garder)
            .map(|e| e.id)
            .collect();
        let avant = self.entrees.len();
        self.entrees.retain(|e| ids.contains(&e.id));
        log::debug!("historique tronqué: {avant} -> {}", self.entrees.len());
    }

    /// Recherche (sous-chaîne, insensible à la casse) : usage ↓, dernier usage ↓, expression.
    pub fn chercher(&self, requete: &str, limite: usize) -> Vec<Entree> {
        let motif = requete.to_lowercase();
        let mut trouvees: Vec<&Entree> = self
            .entrees
            .iter()
            .filter(|e| e.expression.to_lowercase().contains(&motif))
            .collect();
        trouvees.sort_by(|a, b| {
            b.usages
                .cmp(&a.usages)
                .then(b.derniere.cmp(&a.derniere))
                .then_with(|| par_expression(a, b))
        });
        trouvees.into_iter().take(limite).cloned().collect()
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expressions(v: &[Entree]) -> Vec<&str> {
        v.iter().map(|e| e.expression.as_str()).collect()
    }

    #[test]
    fn deduplication_et_usage() {
        let mut h = Historique::new();
        h.ajouter("1+1", "2");
        h.ajouter("2*3", "6");
        h.ajouter("1+1", "2");

        assert_eq!(h.len(), 2);
        let l = h.liste(10);
        assert_eq!(l[0].expression, "1+1");
        assert_eq!(l[0].usages, 2);
        // la création ne bouge pas, le dernier usage si
        assert!(l[0].creee < l[0].derniere);
        assert_eq!(l[1].usages, 1);
    }

    #[test]
    fn reevaluation_met_a_jour_le_resultat() {
        let mut h = Historique::new();
        h.ajouter("pi", "3.14");
        h.ajouter("pi", "3.141592653589793");
        assert_eq!(h.liste(1)[0].resultat, "3.141592653589793");
    }

    #[test]
    fn dernier_usage_departage() {
        let mut h = Historique::new();
        h.ajouter("a1", "1");
        h.ajouter("b2", "2");
        h.ajouter("a1", "1");
        h.ajouter("b2", "2");
        // égalité d’usage : le plus récent d’abord
        assert_eq!(expressions(&h.liste(2)), vec!["b2", "a1"]);
    }

    #[test]
    fn favoris_puis_alphabetique() {
        let mut h = Historique::new();
        // 7 expressions utilisées une fois, dans le désordre alphabétique
        for e in ["g", "F", "e", "D", "c", "B", "a"] {
            h.ajouter(e, "0");
        }
        // "c" devient la plus utilisée
        h.ajouter("c", "0");

        let l = h.liste(10);
        // favoris : c (2 usages), puis par dernier usage ↓ : a, B, D, e
        assert_eq!(expressions(&l[..NB_FAVORIS]), vec!["c", "a", "B", "D", "e"]);
        // reste : alphabétique insensible à la casse
        assert_eq!(expressions(&l[NB_FAVORIS..]), vec!["F", "g"]);
    }

    #[test]
    fn liste_limite() {
        let mut h = Historique::new();
        for i in 0..20 {
            h.ajouter(&format!("{i}+0"), &i.to_string());
        }
        assert_eq!(h.liste(5).len(), 5);
        assert_eq!(h.liste(100).len(), 20);
    }

    #[test]
    fn tronquer_garde_l_ordre_d_affichage() {
        let mut h = Historique::new();
        for e in ["z", "y", "x", "w", "v", "u", "t"] {
            h.ajouter(e, "0");
        }
        h.ajouter("z", "0");
        h.tronquer(6);

        assert_eq!(h.len(), 6);
        let l = h.liste(10);
        // favoris : z, puis t u v w (dernier usage ↓) ; reste alphabétique : x (y tronqué)
        assert_eq!(expressions(&l), vec!["z", "t", "u", "v", "w", "x"]);
    }

    #[test]
    fn tronquer_sans_effet() {
        let mut h = Historique::new();
        h.ajouter("1", "1");
        h.tronquer(10);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn recherche() {
        let mut h = Historique::new();
        h.ajouter("PMT(0.01, 12, 1000)", "-88.85");
        h.ajouter("sin(pi)", "0");
        h.ajouter("pmt(0, 12, -1200)", "100");
        h.ajouter("pmt(0, 12, -1200)", "100");

        let r = h.chercher("pmt", 10);
        assert_eq!(
            expressions(&r),
            vec!["pmt(0, 12, -1200)", "PMT(0.01, 12, 1000)"]
        );
        assert!(h.chercher("cos", 10).is_empty());
        assert_eq!(h.chercher("", 10).len(), 3);
    }

    #[test]
    fn vider() {
        let mut h = Historique::new();
        h.ajouter("1", "1");
        h.vider();
        assert!(h.is_empty());
    }
}
