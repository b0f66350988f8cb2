// src/main.rs
//
// Calculatrice à touches — lanceur terminal
// -----------------------------------------
// But:
// - Lire des touches (argument --touches, sinon stdin ligne par ligne)
// - Les appliquer à la calculatrice
// - Imprimer l’écran (et la démarche si demandé)
//
// Touches : 0-9 . , + - * / ( ) = < C A  (voir app/evenement.rs)
// Journal : RUST_LOG=debug pour voir jetons/RPN, trace pour chaque transition.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use calculatrice_touches::app::{
    depuis_touches, texte_demarche, texte_ecran, Calculatrice, Reglages, Statut, PRECISION_DEFAUT,
    PRECISION_MAX,
};

/// Titre unique (aide + bannière).
const TITRE_APP: &str = "Calculatrice à touches";

#[derive(Parser, Debug)]
#[command(name = "calculatrice_touches", version, about = TITRE_APP)]
struct Args {
    /// Chiffres fractionnaires gardés à chaque division (borné)
    #[arg(short, long, default_value_t = PRECISION_DEFAUT)]
    precision: u32,

    /// Affiche la démarche (jetons, prétraitement, RPN) après chaque calcul
    #[arg(short, long)]
    demarche: bool,

    /// Touches à appliquer d’un coup (sinon : lecture de stdin)
    #[arg(short, long)]
    touches: Option<String>,
}

fn installer_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

/// Applique une ligne de touches, puis imprime l’écran.
fn traiter(
    calc: &mut Calculatrice,
    ligne: &str,
    demarche: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    for ev in depuis_touches(ligne) {
        let avant_resultat = calc.statut() == Statut::Resultat;
        if let Err(e) = calc.appliquer(ev) {
            warn!(evenement = ?ev, erreur = %e, "événement refusé");
        }

        let nouveau_resultat = !avant_resultat && calc.statut() == Statut::Resultat;
        if demarche && nouveau_resultat {
            if let Some(d) = calc.demarche() {
                writeln!(out, "{}", texte_demarche(d))?;
            }
        }
    }

    writeln!(out, "{}", texte_ecran(calc.instantane()))
}

fn main() -> io::Result<()> {
    installer_journal();

    let args = Args::parse();
    if args.precision > PRECISION_MAX {
        warn!(demandee = args.precision, max = PRECISION_MAX, "précision bornée");
    }

    let mut calc = Calculatrice::avec_reglages(Reglages::avec_precision(args.precision));
    info!(precision = calc.reglages().precision, "{TITRE_APP}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(touches) = args.touches.as_deref() {
        return traiter(&mut calc, touches, args.demarche, &mut out);
    }

    for ligne in io::stdin().lock().lines() {
        traiter(&mut calc, &ligne?, args.demarche, &mut out)?;
        out.flush()?;
    }

    Ok(())
}
