pub mod generated_image;
