use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::models::manifest::ManifestRow;

/// Column names expected by the logistics partner, in order.
pub const HEADER: [&str; 17] = [
    "Action",
    "Date de début souhaitée",
    "Référence Bénéficiaire",
    "Nom Prenom ou Raison sociale",
    "Lieu de remise",
    "Numero ou Boite aux lettres - Couloir-Escalier",
    "Numero et libelle de voie",
    "Complement commune ou service postal",
    "Code postal",
    "Localite",
    "Indication d'acces au beneficiaire",
    "indications complementaires",
    "Nombre d'objets",
    "Numéro de téléphone",
    "Email",
    "Metadonnées",
    "Paramètres Internes",
];

const ACTION_CREATE: &str = "CREER";
const DATE_FORMAT: &str = "%d/%m/%Y";

pub struct ManifestBuilder;

impl ManifestBuilder {
    pub fn file_name(reference_date: NaiveDate) -> String {
        format!("livraisons_{}.csv", reference_date.format("%Y-%m-%d"))
    }

    /// Serialize rows as `;`-separated UTF-8, header first. Row order is kept.
    pub fn render(rows: &[ManifestRow]) -> Result<Vec<u8>, csv::Error> {
        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record(Self::record(row))?;
        }

        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }

    fn record(row: &ManifestRow) -> [String; 17] {
        let b = &row.beneficiary;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        [
            ACTION_CREATE.to_string(),
            row.delivery_date.format(DATE_FORMAT).to_string(),
            row.reference.clone(),
            b.full_name.clone(),
            text(&b.delivery_location),
            text(&b.mailbox_number),
            text(&b.street),
            text(&b.locality_complement),
            text(&b.postal_code),
            text(&b.locality),
            text(&b.access_instructions),
            text(&b.extra_instructions),
            format_count(row.count),
            text(&b.phone),
            String::new(),
            metadata(row),
            format!("{{'ROUND':'{}'}}", row.route()),
        ]
    }
}

/// Two decimals with a comma separator: 3 -> "3,00".
pub fn format_count(count: u32) -> String {
    format!("{:.2}", f64::from(count)).replace('.', ",")
}

fn metadata(row: &ManifestRow) -> String {
    let dates = row
        .consumption_dates
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{{'Regime':'{}','JourConso':'{}'}}",
        row.beneficiary.regime.as_deref().unwrap_or(""),
        dates
    )
}
