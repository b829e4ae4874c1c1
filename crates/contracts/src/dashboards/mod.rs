pub mod d410_report_pipeline;
