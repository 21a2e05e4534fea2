//! Writing solutions: the plain gene list and the detailed CSV-like report.

use crate::evaluation::{CapacityUsage, FitnessEvaluator, Penalties};
use crate::ga::{Allocation, Gene};
use crate::models::Dataset;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Header line of the detailed report.
pub const DETAILED_HEADER: &str =
    "ID_ALUNO;ID_SALA_ALOCADA;ID_ESCOLA;ETAPA_DESEJADA;ETAPA_OFERECIDA;DISTANCIA_KM;CUSTO_TOTAL";

/// Error raised while writing or reading a solution.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The file could not be created, written or read.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of a plain solution is not an integer classroom index.
    #[error("line {line}: invalid classroom index {token:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        token: String,
    },

    /// The allocation does not hold exactly one gene per student.
    #[error("allocation has {genes} gene(s) but the dataset has {students} student(s)")]
    LengthMismatch {
        /// Genes in the allocation.
        genes: usize,
        /// Students in the dataset.
        students: usize,
    },

    /// A gene points past the classroom list.
    #[error("student {student}: classroom index {room} out of range ({n_rooms} classrooms)")]
    InvalidGene {
        /// Student position.
        student: usize,
        /// The bad classroom index.
        room: usize,
        /// Number of classrooms.
        n_rooms: usize,
    },
}

impl ReportError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// External form of a gene: the classroom index or `-1`.
fn gene_code(gene: Gene) -> i64 {
    gene.map_or(-1, |room| room as i64)
}

/// Writes one classroom index (or `-1`) per line, in student order.
pub fn write_plain<W: Write>(mut writer: W, allocation: &Allocation) -> std::io::Result<()> {
    for &gene in allocation.genes() {
        writeln!(writer, "{}", gene_code(gene))?;
    }
    writer.flush()
}

/// Reads back a solution written by [`write_plain`].
///
/// Blank lines are skipped. Any negative value reads as unassigned.
pub fn parse_plain<R: Read>(reader: R) -> Result<Allocation, ReportError> {
    let mut genes = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(ReportError::io(Path::new("<input>")))?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let code: i64 = token.parse().map_err(|_| ReportError::Parse {
            line: idx + 1,
            token: token.to_string(),
        })?;
        genes.push(usize::try_from(code).ok());
    }
    Ok(Allocation::new(genes))
}

/// Writes the detailed report and returns the recomputed total cost.
///
/// One row per student. Unassigned rows carry `NA` for the school and
/// offered grade. The distance column is in meters with two decimals, and
/// the cost column is the per-student cost (distance in km plus any grade
/// penalty). The returned total adds capacity overflow on top of the row
/// costs, so it matches [`FitnessEvaluator::cost_of`].
///
/// # Errors
///
/// [`ReportError::LengthMismatch`] before anything is written if the
/// allocation is not one gene per student, [`ReportError::InvalidGene`] if
/// a gene is out of range (nothing after that row is written), or
/// [`ReportError::Io`] on write failure.
pub fn write_detailed<W: Write>(
    mut writer: W,
    dataset: &Dataset,
    penalties: &Penalties,
    allocation: &Allocation,
) -> Result<f64, ReportError> {
    if allocation.len() != dataset.n_students() {
        return Err(ReportError::LengthMismatch {
            genes: allocation.len(),
            students: dataset.n_students(),
        });
    }

    let sink = Path::new("<output>");
    let evaluator = FitnessEvaluator::new(dataset, *penalties);
    let mut usage = CapacityUsage::new(dataset.n_rooms());
    let mut total = 0.0;

    writeln!(writer, "{DETAILED_HEADER}").map_err(ReportError::io(sink))?;

    for (student, (&gene, s)) in allocation
        .genes()
        .iter()
        .zip(dataset.students())
        .enumerate()
    {
        let Some(room) = gene else {
            total += penalties.unassigned;
            writeln!(
                writer,
                "{};-1;NA;{};NA;0.00;{:.2}",
                s.id, s.desired_grade, penalties.unassigned
            )
            .map_err(ReportError::io(sink))?;
            continue;
        };

        if room >= dataset.n_rooms() {
            return Err(ReportError::InvalidGene {
                student,
                room,
                n_rooms: dataset.n_rooms(),
            });
        }

        let placement = evaluator.placement(student, room);
        usage.add(room);
        total += placement.cost;

        writeln!(
            writer,
            "{};{};{};{};{};{:.2};{:.2}",
            s.id,
            room,
            dataset.school_of(room).id,
            s.desired_grade,
            dataset.classrooms()[room].grade,
            placement.distance_km * 1000.0,
            placement.cost
        )
        .map_err(ReportError::io(sink))?;
    }

    writer.flush().map_err(ReportError::io(sink))?;

    total += usage.overflow_units(dataset) as f64 * penalties.overflow;
    Ok(total)
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(ReportError::io(path))
}

/// [`write_plain`] to a file.
pub fn save_plain(path: &Path, allocation: &Allocation) -> Result<(), ReportError> {
    write_plain(create(path)?, allocation).map_err(ReportError::io(path))?;
    tracing::info!(path = %path.display(), "saved solution");
    Ok(())
}

/// [`parse_plain`] from a file.
pub fn load_plain(path: &Path) -> Result<Allocation, ReportError> {
    let file = File::open(path).map_err(ReportError::io(path))?;
    parse_plain(file).map_err(|err| match err {
        ReportError::Io { source, .. } => ReportError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// [`write_detailed`] to a file.
pub fn save_detailed(
    path: &Path,
    dataset: &Dataset,
    penalties: &Penalties,
    allocation: &Allocation,
) -> Result<f64, ReportError> {
    let total = write_detailed(create(path)?, dataset, penalties, allocation).map_err(
        |err| match err {
            ReportError::Io { source, .. } => ReportError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        },
    )?;
    tracing::info!(path = %path.display(), total, "saved detailed report");
    Ok(total)
}
