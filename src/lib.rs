// src/lib.rs
//
// Bibliothèque : le noyau de calcul, sans aucune dépendance à l’interface.

pub mod noyau;
