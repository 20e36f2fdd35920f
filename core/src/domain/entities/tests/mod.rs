mod subject_tests;
