//! Arrow batch assembly and parquet persistence.
//!
//! One builder pass per artifact: rows stream directly into typed Arrow
//! builders (no intermediate untyped frame), then the finished
//! `RecordBatch` is written with LZ4 compression. Repeated string labels
//! (`unit_type`, `upgrade`) use dictionary encoding.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Float32Builder, Int16Builder, StringDictionaryBuilder,
    UInt16Builder, UInt32Builder, UInt64Builder, UInt8Builder,
};
use arrow::datatypes::{DataType, Field, Int32Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;

use fogline_core::{ReplayMetadata, UpgradeCompletion};
use fogline_merge::{ConsolidatedReplay, GroundTruthUnitRow, MergedDeathRow, ResourceRow};

use crate::cast::{supply_to_u16, to_f32, to_i16, to_u16, to_u8};
use crate::error::SchemaError;
use crate::sidecar::write_metadata_sidecar;

/// Dictionary-encoded string column (`category` in the storage schema).
fn dict_field(name: &str) -> Field {
    Field::new(
        name,
        DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
        false,
    )
}

/// Build the `units.parquet` batch from merged ground-truth rows.
pub fn units_batch(rows: &[GroundTruthUnitRow]) -> Result<RecordBatch, SchemaError> {
    let mut timestamp = Float32Builder::with_capacity(rows.len());
    let mut unit_tag = UInt64Builder::with_capacity(rows.len());
    let mut unit_type = StringDictionaryBuilder::<Int32Type>::new();
    let mut player_id = UInt8Builder::with_capacity(rows.len());
    let mut position_x = Float32Builder::with_capacity(rows.len());
    let mut position_y = Float32Builder::with_capacity(rows.len());
    let mut is_snapshot = BooleanBuilder::with_capacity(rows.len());
    let mut health = Float32Builder::with_capacity(rows.len());
    let mut shield = Float32Builder::with_capacity(rows.len());
    let mut energy = Float32Builder::with_capacity(rows.len());
    let mut build_progress = Float32Builder::with_capacity(rows.len());
    let mut resource_remaining = Int16Builder::with_capacity(rows.len());
    let mut visible_p1 = BooleanBuilder::with_capacity(rows.len());
    let mut visible_p2 = BooleanBuilder::with_capacity(rows.len());
    let mut truth_p1 = BooleanBuilder::with_capacity(rows.len());
    let mut truth_p2 = BooleanBuilder::with_capacity(rows.len());
    let mut is_neutral = BooleanBuilder::with_capacity(rows.len());

    for row in rows {
        timestamp.append_value(to_f32("timestamp", row.timestamp)?);
        unit_tag.append_value(row.unit_tag.0);
        unit_type.append_value(&row.unit_type);
        player_id.append_value(to_u8("player_id", row.player_id)?);
        position_x.append_value(row.position_x);
        position_y.append_value(row.position_y);
        is_snapshot.append_value(row.is_snapshot);
        health.append_value(row.health);
        shield.append_value(row.shield);
        energy.append_value(row.energy);
        build_progress.append_value(row.build_progress);
        resource_remaining.append_value(to_i16("resource_remaining", row.resource_remaining)?);
        visible_p1.append_value(row.visible_to_p1);
        visible_p2.append_value(row.visible_to_p2);
        truth_p1.append_value(row.ground_truth_p1);
        truth_p2.append_value(row.ground_truth_p2);
        is_neutral.append_value(row.is_neutral);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("timestamp", DataType::Float32, false),
        Field::new("unit_tag", DataType::UInt64, false),
        dict_field("unit_type"),
        Field::new("player_id", DataType::UInt8, false),
        Field::new("position_x", DataType::Float32, false),
        Field::new("position_y", DataType::Float32, false),
        Field::new("is_snapshot", DataType::Boolean, false),
        Field::new("health", DataType::Float32, false),
        Field::new("shield", DataType::Float32, false),
        Field::new("energy", DataType::Float32, false),
        Field::new("build_progress", DataType::Float32, false),
        Field::new("resource_remaining", DataType::Int16, false),
        Field::new("is_visible_to_player_1", DataType::Boolean, false),
        Field::new("is_visible_to_player_2", DataType::Boolean, false),
        Field::new("is_ground_truth_for_player_1", DataType::Boolean, false),
        Field::new("is_ground_truth_for_player_2", DataType::Boolean, false),
        Field::new("is_neutral", DataType::Boolean, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(timestamp.finish()),
        Arc::new(unit_tag.finish()),
        Arc::new(unit_type.finish()),
        Arc::new(player_id.finish()),
        Arc::new(position_x.finish()),
        Arc::new(position_y.finish()),
        Arc::new(is_snapshot.finish()),
        Arc::new(health.finish()),
        Arc::new(shield.finish()),
        Arc::new(energy.finish()),
        Arc::new(build_progress.finish()),
        Arc::new(resource_remaining.finish()),
        Arc::new(visible_p1.finish()),
        Arc::new(visible_p2.finish()),
        Arc::new(truth_p1.finish()),
        Arc::new(truth_p2.finish()),
        Arc::new(is_neutral.finish()),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the `deaths.parquet` batch from merged death rows.
pub fn deaths_batch(rows: &[MergedDeathRow]) -> Result<RecordBatch, SchemaError> {
    let mut timestamp = Float32Builder::with_capacity(rows.len());
    let mut unit_tag = UInt64Builder::with_capacity(rows.len());
    let mut unit_type = StringDictionaryBuilder::<Int32Type>::new();
    let mut player_id = UInt8Builder::with_capacity(rows.len());
    let mut position_x = Float32Builder::with_capacity(rows.len());
    let mut position_y = Float32Builder::with_capacity(rows.len());
    let mut visible_p1 = BooleanBuilder::with_capacity(rows.len());
    let mut visible_p2 = BooleanBuilder::with_capacity(rows.len());

    for row in rows {
        timestamp.append_value(to_f32("timestamp", row.timestamp)?);
        unit_tag.append_value(row.unit_tag.0);
        unit_type.append_value(&row.unit_type);
        player_id.append_value(to_u8("player_id", row.player_id)?);
        position_x.append_value(row.position_x);
        position_y.append_value(row.position_y);
        visible_p1.append_value(row.visible_to_p1);
        visible_p2.append_value(row.visible_to_p2);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("timestamp", DataType::Float32, false),
        Field::new("unit_tag", DataType::UInt64, false),
        dict_field("unit_type"),
        Field::new("player_id", DataType::UInt8, false),
        Field::new("position_x", DataType::Float32, false),
        Field::new("position_y", DataType::Float32, false),
        Field::new("is_visible_to_player_1", DataType::Boolean, false),
        Field::new("is_visible_to_player_2", DataType::Boolean, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(timestamp.finish()),
        Arc::new(unit_tag.finish()),
        Arc::new(unit_type.finish()),
        Arc::new(player_id.finish()),
        Arc::new(position_x.finish()),
        Arc::new(position_y.finish()),
        Arc::new(visible_p1.finish()),
        Arc::new(visible_p2.finish()),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the `resources.parquet` batch from joined resource rows.
pub fn resources_batch(rows: &[ResourceRow]) -> Result<RecordBatch, SchemaError> {
    let mut timestamp = Float32Builder::with_capacity(rows.len());
    let mut p1_minerals = UInt32Builder::with_capacity(rows.len());
    let mut p1_vespene = UInt32Builder::with_capacity(rows.len());
    let mut p1_supply_cap = UInt16Builder::with_capacity(rows.len());
    let mut p1_supply_used = UInt16Builder::with_capacity(rows.len());
    let mut p1_supply_army = UInt16Builder::with_capacity(rows.len());
    let mut p2_minerals = UInt32Builder::with_capacity(rows.len());
    let mut p2_vespene = UInt32Builder::with_capacity(rows.len());
    let mut p2_supply_cap = UInt16Builder::with_capacity(rows.len());
    let mut p2_supply_used = UInt16Builder::with_capacity(rows.len());
    let mut p2_supply_army = UInt16Builder::with_capacity(rows.len());

    for row in rows {
        timestamp.append_value(to_f32("timestamp", row.timestamp)?);
        p1_minerals.append_value(row.p1.minerals);
        p1_vespene.append_value(row.p1.vespene);
        p1_supply_cap.append_value(supply_to_u16("p1_supply_cap", row.p1.supply_cap)?);
        p1_supply_used.append_value(supply_to_u16("p1_supply_used", row.p1.supply_used)?);
        p1_supply_army.append_value(supply_to_u16("p1_supply_army", row.p1.supply_army)?);
        p2_minerals.append_value(row.p2.minerals);
        p2_vespene.append_value(row.p2.vespene);
        p2_supply_cap.append_value(supply_to_u16("p2_supply_cap", row.p2.supply_cap)?);
        p2_supply_used.append_value(supply_to_u16("p2_supply_used", row.p2.supply_used)?);
        p2_supply_army.append_value(supply_to_u16("p2_supply_army", row.p2.supply_army)?);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("timestamp", DataType::Float32, false),
        Field::new("p1_minerals", DataType::UInt32, false),
        Field::new("p1_vespene", DataType::UInt32, false),
        Field::new("p1_supply_cap", DataType::UInt16, false),
        Field::new("p1_supply_used", DataType::UInt16, false),
        Field::new("p1_supply_army", DataType::UInt16, false),
        Field::new("p2_minerals", DataType::UInt32, false),
        Field::new("p2_vespene", DataType::UInt32, false),
        Field::new("p2_supply_cap", DataType::UInt16, false),
        Field::new("p2_supply_used", DataType::UInt16, false),
        Field::new("p2_supply_army", DataType::UInt16, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(timestamp.finish()),
        Arc::new(p1_minerals.finish()),
        Arc::new(p1_vespene.finish()),
        Arc::new(p1_supply_cap.finish()),
        Arc::new(p1_supply_used.finish()),
        Arc::new(p1_supply_army.finish()),
        Arc::new(p2_minerals.finish()),
        Arc::new(p2_vespene.finish()),
        Arc::new(p2_supply_cap.finish()),
        Arc::new(p2_supply_used.finish()),
        Arc::new(p2_supply_army.finish()),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the `upgrades.parquet` batch from merged completions.
pub fn upgrades_batch(rows: &[UpgradeCompletion]) -> Result<RecordBatch, SchemaError> {
    let mut time_completed = Float32Builder::with_capacity(rows.len());
    let mut upgrade = StringDictionaryBuilder::<Int32Type>::new();
    let mut player_id = UInt8Builder::with_capacity(rows.len());
    let mut mineral_cost = UInt16Builder::with_capacity(rows.len());
    let mut vespene_cost = UInt16Builder::with_capacity(rows.len());
    let mut imputed_start = Float32Builder::with_capacity(rows.len());

    for row in rows {
        time_completed.append_value(to_f32("time_completed", row.time_completed)?);
        upgrade.append_value(&row.upgrade);
        player_id.append_value(to_u8("player_id", row.player_id)?);
        mineral_cost.append_value(to_u16("mineral_cost", row.mineral_cost)?);
        vespene_cost.append_value(to_u16("vespene_cost", row.vespene_cost)?);
        imputed_start.append_value(to_f32("imputed_start", row.imputed_start)?);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("time_completed", DataType::Float32, false),
        dict_field("upgrade"),
        Field::new("player_id", DataType::UInt8, false),
        Field::new("mineral_cost", DataType::UInt16, false),
        Field::new("vespene_cost", DataType::UInt16, false),
        Field::new("imputed_start", DataType::Float32, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(time_completed.finish()),
        Arc::new(upgrade.finish()),
        Arc::new(player_id.finish()),
        Arc::new(mineral_cost.finish()),
        Arc::new(vespene_cost.finish()),
        Arc::new(imputed_start.finish()),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Write one batch as an LZ4-compressed parquet file.
pub fn write_batch(path: &Path, batch: &RecordBatch) -> Result<(), SchemaError> {
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::LZ4)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Persist a consolidated replay as one directory of columnar artifacts.
///
/// Writes `units.parquet` and `resources.parquet` always, `deaths.parquet`
/// and `upgrades.parquet` only when present, and the metadata sidecar.
/// Any cast or I/O failure leaves the directory partially written; the
/// batch layer purges it.
pub fn persist_replay(
    dir: &Path,
    replay: &ConsolidatedReplay,
    metadata: &ReplayMetadata,
) -> Result<(), SchemaError> {
    std::fs::create_dir_all(dir)?;

    write_batch(&dir.join("units.parquet"), &units_batch(&replay.units)?)?;
    write_batch(
        &dir.join("resources.parquet"),
        &resources_batch(&replay.resources)?,
    )?;
    if let Some(deaths) = &replay.deaths {
        write_batch(&dir.join("deaths.parquet"), &deaths_batch(deaths)?)?;
    }
    if let Some(upgrades) = &replay.upgrades {
        write_batch(&dir.join("upgrades.parquet"), &upgrades_batch(upgrades)?)?;
    }
    write_metadata_sidecar(dir, metadata)?;

    info!(
        dir = %dir.display(),
        unit_rows = replay.units.len(),
        resource_rows = replay.resources.len(),
        "persisted replay artifacts"
    );
    Ok(())
}
